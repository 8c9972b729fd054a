use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::shared::AppError;

/// Registry of live adapter connections, at most one per platform
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    /// Registers a gateway and returns its connection id. Any previous gateway
    /// for the same platform is dropped, which closes its outbound channel.
    async fn add_gateway(&self, platform: String, sender: mpsc::UnboundedSender<String>)
        -> String;

    /// Removes the gateway only if it is still the registered one
    async fn remove_gateway(&self, platform: &str, connection_id: &str);

    async fn send_to_gateway(&self, platform: &str, frame: &str) -> Result<(), AppError>;

    async fn is_connected(&self, platform: &str) -> bool;
}

struct GatewayConnection {
    id: String,
    sender: mpsc::UnboundedSender<String>,
}

pub struct InMemoryConnectionManager {
    // platform -> live gateway
    gateways: Arc<RwLock<HashMap<String, GatewayConnection>>>,
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            gateways: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_gateway(
        &self,
        platform: String,
        sender: mpsc::UnboundedSender<String>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        let mut gateways = self.gateways.write().await;

        if let Some(previous) = gateways.insert(
            platform.clone(),
            GatewayConnection {
                id: id.clone(),
                sender,
            },
        ) {
            info!(platform = %platform, replaced = %previous.id, "Gateway replaced by new connection");
        }

        info!(platform = %platform, connection_id = %id, "Gateway connected");
        id
    }

    async fn remove_gateway(&self, platform: &str, connection_id: &str) {
        let mut gateways = self.gateways.write().await;

        match gateways.get(platform) {
            Some(current) if current.id == connection_id => {
                gateways.remove(platform);
                info!(platform = %platform, connection_id = %connection_id, "Gateway disconnected");
            }
            _ => debug!(
                platform = %platform,
                connection_id = %connection_id,
                "Stale gateway removal ignored"
            ),
        }
    }

    async fn send_to_gateway(&self, platform: &str, frame: &str) -> Result<(), AppError> {
        let gateways = self.gateways.read().await;

        let gateway = gateways.get(platform).ok_or_else(|| {
            AppError::SendFailed(format!("no gateway connected for platform '{}'", platform))
        })?;

        gateway.sender.send(frame.to_string()).map_err(|_| {
            warn!(platform = %platform, connection_id = %gateway.id, "Gateway channel closed");
            AppError::SendFailed("gateway connection closed".to_string())
        })
    }

    async fn is_connected(&self, platform: &str) -> bool {
        self.gateways.read().await.contains_key(platform)
    }
}

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::{connection_manager::ConnectionManager, messages::GatewayFrame};
use crate::{
    platform::{Bot, Destination},
    shared::AppError,
};

/// Bot whose sends are `SEND` frames written to the gateway of the platform
/// named in each call
pub struct GatewayBot {
    connection_manager: Arc<dyn ConnectionManager>,
}

impl GatewayBot {
    pub fn new(connection_manager: Arc<dyn ConnectionManager>) -> Self {
        Self { connection_manager }
    }
}

#[async_trait]
impl Bot for GatewayBot {
    async fn send_message(
        &self,
        platform: &str,
        destination: &Destination,
        content: &str,
    ) -> Result<(), AppError> {
        let frame = GatewayFrame::send(destination, content).to_json()?;
        self.connection_manager
            .send_to_gateway(platform, &frame)
            .await?;

        debug!(platform = %platform, destination = %destination, "Send frame queued");
        Ok(())
    }
}

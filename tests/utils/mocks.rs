use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use room_relay::{AppError, Bot, Destination};

use super::setup::PLATFORM;

// ============================================================================
// Mock Infrastructure
// ============================================================================

#[derive(Clone, Default)]
pub struct MockBot {
    // (platform, destination) -> contents in send order
    sent_messages: Arc<RwLock<HashMap<(String, Destination), Vec<String>>>>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent to `destination` on the relayed platform
    pub async fn get_messages_for(&self, destination: &Destination) -> Vec<String> {
        self.get_messages_on(PLATFORM, destination).await
    }

    pub async fn get_messages_on(&self, platform: &str, destination: &Destination) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(&(platform.to_string(), destination.clone()))
            .cloned()
            .unwrap_or_default()
    }

    pub async fn total_sent(&self) -> usize {
        self.sent_messages.read().await.values().map(Vec::len).sum()
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(
        &self,
        platform: &str,
        destination: &Destination,
        content: &str,
    ) -> Result<(), AppError> {
        self.sent_messages
            .write()
            .await
            .entry((platform.to_string(), destination.clone()))
            .or_default()
            .push(content.to_string());
        Ok(())
    }
}

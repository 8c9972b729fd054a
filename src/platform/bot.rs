use async_trait::async_trait;

use super::destination::Destination;
use crate::shared::AppError;

/// Outbound side of the platform connections
///
/// Each call is one independent delivery attempt on the named platform.
/// Callers fanning out to several destinations must not let one failure
/// affect the others.
#[async_trait]
pub trait Bot: Send + Sync {
    async fn send_message(
        &self,
        platform: &str,
        destination: &Destination,
        content: &str,
    ) -> Result<(), AppError>;
}

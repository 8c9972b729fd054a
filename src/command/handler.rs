use tracing::{info, instrument};

use super::parser::SubscriptionCommand;
use crate::{
    platform::InboundMessage,
    shared::AppError,
    subscription::{replies, SubscriptionService},
};

/// Executes subscription commands and produces the textual reply
pub struct CommandHandler {
    service: SubscriptionService,
}

impl CommandHandler {
    pub fn new(service: SubscriptionService) -> Self {
        Self { service }
    }

    #[instrument(skip(self, message), fields(user_id = %message.user_id))]
    pub async fn handle(
        &self,
        command: SubscriptionCommand,
        message: &InboundMessage,
    ) -> Result<String, AppError> {
        let desired = command.desired_status();

        let outcome = self
            .service
            .toggle(&message.platform, &message.user_id, desired)
            .await?;

        let reply = replies::render(&outcome, &message.username, desired);

        info!(
            command = %command,
            user_id = %message.user_id,
            mutated = outcome.mutated(),
            "Subscription command handled"
        );

        Ok(reply)
    }
}

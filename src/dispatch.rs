use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{
    command::{parse_command, CommandHandler},
    config::RelayConfig,
    platform::{Bot, InboundMessage},
    relay::MessageRelay,
    shared::AppError,
    subscription::{repository::SubscriptionRepository, SubscriptionService},
};

/// What happened to an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handled as a subscription command; carries the reply text
    Command(String),
    /// Routed through the relay; carries the number of delivered copies
    Relayed(usize),
}

/// Routes each inbound message to either the command handler or the relay
pub struct EventDispatcher {
    commands: CommandHandler,
    relay: MessageRelay,
    bot: Arc<dyn Bot>,
    config: Arc<RelayConfig>,
}

impl EventDispatcher {
    pub fn new(
        config: Arc<RelayConfig>,
        repository: Arc<dyn SubscriptionRepository + Send + Sync>,
        bot: Arc<dyn Bot>,
    ) -> Self {
        let commands = CommandHandler::new(SubscriptionService::new(
            repository.clone(),
            config.clone(),
        ));
        let relay = MessageRelay::new(
            SubscriptionService::new(repository, config.clone()),
            bot.clone(),
            config.clone(),
        );

        Self {
            commands,
            relay,
            bot,
            config,
        }
    }

    /// Handles one inbound message. Commands are answered on the channel they
    /// came from and are not relayed.
    #[instrument(skip(self, message), fields(user_id = %message.user_id))]
    pub async fn dispatch(&self, message: &InboundMessage) -> Result<DispatchOutcome, AppError> {
        // Only non-command texts reach the relay; command texts are intentionally never relayed
        let Some(command) = parse_command(&message.content, &self.config.command_prefix) else {
            let delivered = self.relay.handle_message(message).await?;
            return Ok(DispatchOutcome::Relayed(delivered));
        };

        debug!(command = %command, "Inbound message is a subscription command");
        let reply = self.commands.handle(command, message).await?;

        match message.reply_destination() {
            Some(destination) => {
                // Answered on the invoker's own platform, which may not be the relayed one
                let sent = self
                    .bot
                    .send_message(&message.platform, &destination, &reply)
                    .await;
                if let Err(e) = sent {
                    warn!(platform = %message.platform, destination = %destination, error = %e, "Failed to deliver command reply");
                }
            }
            None => {
                info!(channel_id = %message.channel_id, "No reply channel for command, dropping reply");
            }
        }

        Ok(DispatchOutcome::Command(reply))
    }
}

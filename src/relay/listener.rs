use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::planner::{plan_relay, relay_text, RelayPolicy, SendInstruction};
use crate::{
    config::RelayConfig,
    platform::{Bot, InboundMessage, Origin},
    shared::AppError,
    subscription::SubscriptionService,
};

/// Listens to inbound messages and forwards them between surfaces
pub struct MessageRelay {
    subscriptions: SubscriptionService,
    bot: Arc<dyn Bot>,
    config: Arc<RelayConfig>,
}

impl MessageRelay {
    pub fn new(
        subscriptions: SubscriptionService,
        bot: Arc<dyn Bot>,
        config: Arc<RelayConfig>,
    ) -> Self {
        Self {
            subscriptions,
            bot,
            config,
        }
    }

    /// Relays one inbound message and returns how many sends succeeded
    ///
    /// Store failures abort the message. Send failures are logged and counted
    /// out; the remaining sends still go through.
    #[instrument(skip(self, message), fields(user_id = %message.user_id, channel_id = %message.channel_id))]
    pub async fn handle_message(&self, message: &InboundMessage) -> Result<usize, AppError> {
        if !self.config.is_target_platform(&message.platform) {
            debug!(platform = %message.platform, "Ignoring message from other platform");
            return Ok(0);
        }

        let origin = match message.origin() {
            Some(origin) => origin,
            None => {
                debug!("Ignoring message from unknown channel kind");
                return Ok(0);
            }
        };

        let sender_subscribed = match origin {
            Origin::Public => false,
            Origin::Private => {
                let subscribed = self.subscriptions.is_subscribed(&message.user_id).await?;
                if !subscribed {
                    debug!("Private message from non-subscriber, not relaying");
                    return Ok(0);
                }
                true
            }
        };

        let subscribers = self.subscriptions.subscriber_uids().await?;
        let plan = plan_relay(
            origin,
            &message.user_id,
            sender_subscribed,
            &relay_text(&message.username, &message.content),
            &subscribers,
            RelayPolicy {
                exclude_sender: self.config.exclude_sender,
            },
        );

        Ok(self.dispatch(&message.platform, plan).await)
    }

    /// Performs every send concurrently; one failure never affects the others
    async fn dispatch(&self, platform: &str, plan: Vec<SendInstruction>) -> usize {
        let planned = plan.len();

        let results = join_all(plan.iter().map(|instruction| async move {
            let result = self
                .bot
                .send_message(platform, &instruction.destination, &instruction.content)
                .await;
            if let Err(e) = &result {
                warn!(
                    destination = %instruction.destination,
                    error = %e,
                    "Relay send failed"
                );
            }
            result
        }))
        .await;

        let delivered = results.iter().filter(|r| r.is_ok()).count();
        info!(planned, delivered, "Message relayed");
        delivered
    }
}

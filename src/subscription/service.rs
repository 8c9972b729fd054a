use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{models::SubscriptionModel, repository::SubscriptionRepository, types::ToggleOutcome};
use crate::{config::RelayConfig, shared::AppError};

/// Service for the admin-gated subscription toggle
pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepository + Send + Sync>,
    config: Arc<RelayConfig>,
}

impl SubscriptionService {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository + Send + Sync>,
        config: Arc<RelayConfig>,
    ) -> Self {
        Self { repository, config }
    }

    /// Sets the invoker's subscription to `desired`
    ///
    /// Platform and admin checks run before any store access. A missing record
    /// is created with the desired status, whichever direction was asked for.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        platform: &str,
        user_id: &str,
        desired: bool,
    ) -> Result<ToggleOutcome, AppError> {
        if !self.config.is_target_platform(platform) {
            debug!(platform = %platform, "Toggle rejected: unsupported platform");
            return Ok(ToggleOutcome::UnsupportedPlatform);
        }

        if !self.config.is_admin(user_id) {
            warn!(user_id = %user_id, "Toggle rejected: not an admin");
            return Ok(ToggleOutcome::PermissionDenied);
        }

        let outcome = match self.repository.get_subscription(user_id).await? {
            Some(existing) if existing.status == desired => ToggleOutcome::Unchanged(existing),
            Some(mut existing) => {
                self.repository.set_status(user_id, desired).await?;
                existing.status = desired;
                ToggleOutcome::Updated(existing)
            }
            None => {
                let subscription = SubscriptionModel::new(user_id, desired);
                self.repository.create_subscription(&subscription).await?;
                ToggleOutcome::Created(subscription)
            }
        };

        info!(
            user_id = %user_id,
            desired,
            mutated = outcome.mutated(),
            "Subscription toggle handled"
        );

        Ok(outcome)
    }

    /// Whether the user currently has forwarding enabled; absence counts as off
    #[instrument(skip(self))]
    pub async fn is_subscribed(&self, user_id: &str) -> Result<bool, AppError> {
        Ok(self
            .repository
            .get_subscription(user_id)
            .await?
            .map(|s| s.is_active())
            .unwrap_or(false))
    }

    /// Uids of every current subscriber
    #[instrument(skip(self))]
    pub async fn subscriber_uids(&self) -> Result<Vec<String>, AppError> {
        let subscribers = self.repository.list_subscribers().await?;
        Ok(subscribers.into_iter().map(|s| s.uid).collect())
    }
}

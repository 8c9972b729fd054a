use super::models::SubscriptionModel;

/// Result of a subscription toggle request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The invoking platform is not the configured integration
    UnsupportedPlatform,
    /// The invoker is not on the admin list
    PermissionDenied,
    /// No record existed; one was created with the requested status
    Created(SubscriptionModel),
    /// The record already had the requested status; nothing was written
    Unchanged(SubscriptionModel),
    /// The record's status was flipped to the requested one
    Updated(SubscriptionModel),
}

impl ToggleOutcome {
    /// Whether this outcome wrote to the store
    pub fn mutated(&self) -> bool {
        matches!(self, ToggleOutcome::Created(_) | ToggleOutcome::Updated(_))
    }
}

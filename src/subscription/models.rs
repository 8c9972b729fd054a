use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the relay subscriptions table
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct SubscriptionModel {
    pub uid: String,  // Platform user identifier, primary key
    pub status: bool, // true = forwarding enabled
}

impl SubscriptionModel {
    pub fn new(uid: impl Into<String>, status: bool) -> Self {
        Self {
            uid: uid.into(),
            status,
        }
    }

    /// Whether this user currently receives relayed messages
    pub fn is_active(&self) -> bool {
        self.status
    }
}

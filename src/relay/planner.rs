use serde::{Deserialize, Serialize};

use crate::platform::{Destination, Origin};

/// One outbound delivery the relay wants performed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendInstruction {
    pub destination: Destination,
    pub content: String,
}

impl SendInstruction {
    pub fn new(destination: Destination, content: impl Into<String>) -> Self {
        Self {
            destination,
            content: content.into(),
        }
    }
}

/// Knobs for who receives a relayed message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayPolicy {
    /// Skip the sender's own private channel when relaying a public message.
    /// Private messages never echo back to their sender regardless.
    pub exclude_sender: bool,
}

impl Default for RelayPolicy {
    fn default() -> Self {
        Self {
            exclude_sender: true,
        }
    }
}

/// Platform mention markup for a username
pub fn mention(username: &str) -> String {
    format!(" [*{}*] ", username)
}

/// Text carried by every relayed copy of a message
pub fn relay_text(username: &str, content: &str) -> String {
    format!("{}： {}", mention(username), content)
}

/// Decides every send a single inbound message should produce.
///
/// `subscribers` are the uids whose status is currently true; the sender may
/// or may not be among them. `sender_subscribed` only matters for private
/// origin, where an unsubscribed sender produces nothing.
pub fn plan_relay(
    origin: Origin,
    sender_uid: &str,
    sender_subscribed: bool,
    text: &str,
    subscribers: &[String],
    policy: RelayPolicy,
) -> Vec<SendInstruction> {
    let skip_sender = match origin {
        Origin::Public => policy.exclude_sender,
        Origin::Private => {
            if !sender_subscribed {
                return Vec::new();
            }
            true
        }
    };

    let private_copies = subscribers
        .iter()
        .filter(|uid| !(skip_sender && uid.as_str() == sender_uid))
        .map(|uid| SendInstruction::new(Destination::private(uid.clone()), text));

    match origin {
        Origin::Public => private_copies.collect(),
        Origin::Private => std::iter::once(SendInstruction::new(Destination::Public, text))
            .chain(private_copies)
            .collect(),
    }
}

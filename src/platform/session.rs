use serde::{Deserialize, Serialize};

use super::destination::Destination;

/// Which surface an inbound message was posted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Public,
    Private,
}

impl Origin {
    /// Classifies a platform channel id; unknown channel kinds yield `None`
    pub fn from_channel_id(channel_id: &str) -> Option<Self> {
        if channel_id.starts_with("public") {
            Some(Origin::Public)
        } else if channel_id.starts_with("private") {
            Some(Origin::Private)
        } else {
            None
        }
    }
}

/// One message event delivered by the platform adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub platform: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    pub channel_id: String,
}

impl InboundMessage {
    pub fn origin(&self) -> Option<Origin> {
        Origin::from_channel_id(&self.channel_id)
    }

    /// Where a reply to this message should go
    pub fn reply_destination(&self) -> Option<Destination> {
        match self.origin()? {
            Origin::Public => Some(Destination::Public),
            Origin::Private => Some(Destination::private(self.user_id.clone())),
        }
    }
}

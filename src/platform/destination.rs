use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::AppError;

const PUBLIC: &str = "public";
const PRIVATE_PREFIX: &str = "private:";

/// Target of an outbound message
///
/// Encoded on the wire as `public` or `private:{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Destination {
    /// The integration's public room
    Public,
    /// Direct channel between the bot and one user
    Private(String),
}

impl Destination {
    pub fn private(uid: impl Into<String>) -> Self {
        Destination::Private(uid.into())
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Destination::Public)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Public => write!(f, "{}", PUBLIC),
            Destination::Private(uid) => write!(f, "{}{}", PRIVATE_PREFIX, uid),
        }
    }
}

impl FromStr for Destination {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == PUBLIC {
            return Ok(Destination::Public);
        }

        match s.strip_prefix(PRIVATE_PREFIX) {
            Some(uid) if !uid.is_empty() => Ok(Destination::Private(uid.to_string())),
            _ => Err(AppError::InvalidFrame(format!("unknown destination '{}'", s))),
        }
    }
}

impl TryFrom<String> for Destination {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Destination> for String {
    fn from(destination: Destination) -> Self {
        destination.to_string()
    }
}

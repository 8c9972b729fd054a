use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::shared::AppError;

pub const DEFAULT_PLATFORM: &str = "iirose";
pub const DEFAULT_COMMAND_PREFIX: &str = "iirose";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Runtime configuration, read once at startup and never mutated afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// User ids allowed to toggle their subscription
    pub admin_list: Vec<String>,
    /// Platform name inbound events must carry to be handled
    pub platform: String,
    /// Namespace of the full command names (`{prefix}.sub.on`)
    pub command_prefix: String,
    /// Whether a public message skips the sender's own private channel
    pub exclude_sender: bool,
    pub bind_addr: String,
    pub database_url: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            admin_list: Vec::new(),
            platform: DEFAULT_PLATFORM.to_string(),
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
            exclude_sender: true,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: None,
        }
    }
}

impl RelayConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let admin_list = lookup("RELAY_ADMIN_LIST")
            .map(|raw| parse_list(&raw))
            .unwrap_or_default();

        let exclude_sender = match lookup("RELAY_EXCLUDE_SENDER") {
            Some(raw) => parse_bool("RELAY_EXCLUDE_SENDER", &raw)?,
            None => defaults.exclude_sender,
        };

        let config = Self {
            admin_list,
            platform: non_empty(lookup("RELAY_PLATFORM")).unwrap_or(defaults.platform),
            command_prefix: non_empty(lookup("RELAY_COMMAND_PREFIX"))
                .unwrap_or(defaults.command_prefix),
            exclude_sender,
            bind_addr: non_empty(lookup("RELAY_BIND_ADDR")).unwrap_or(defaults.bind_addr),
            database_url: non_empty(lookup("DATABASE_URL")),
        };

        info!(
            platform = %config.platform,
            admin_count = config.admin_list.len(),
            exclude_sender = config.exclude_sender,
            persistent = config.database_url.is_some(),
            "Configuration loaded"
        );

        Ok(config)
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        let allowed = self.admin_list.iter().any(|admin| admin == user_id);
        debug!(user_id = %user_id, allowed, "Admin check");
        allowed
    }

    pub fn is_target_platform(&self, platform: &str) -> bool {
        self.platform == platform
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

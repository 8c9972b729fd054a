use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Subcommands of the subscription command namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString, EnumIter)]
pub enum SubscriptionCommand {
    #[strum(serialize = "sub.on")]
    On,
    #[strum(serialize = "sub.off")]
    Off,
}

impl SubscriptionCommand {
    /// Subscription status the command asks for
    pub fn desired_status(&self) -> bool {
        matches!(self, SubscriptionCommand::On)
    }

    pub fn description(&self) -> &'static str {
        match self {
            SubscriptionCommand::On => "开启订阅",
            SubscriptionCommand::Off => "关闭订阅",
        }
    }
}

/// Recognises `sub.on` / `sub.off`, bare or as `{prefix}.sub.on`
///
/// Only the first whitespace-separated token is inspected; trailing text is
/// ignored since the commands take no arguments.
pub fn parse_command(content: &str, prefix: &str) -> Option<SubscriptionCommand> {
    let token = content.split_whitespace().next()?;

    let name = token
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(token);

    SubscriptionCommand::from_str(name).ok()
}

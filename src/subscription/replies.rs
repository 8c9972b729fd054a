// User-facing reply texts for the subscription commands

use super::types::ToggleOutcome;

pub const REPLY_PREFIX: &str = " [IIROSE-Subscribe] ";

/// Renders the reply sent back to the invoking channel
pub fn render(outcome: &ToggleOutcome, username: &str, desired: bool) -> String {
    let body = match outcome {
        ToggleOutcome::UnsupportedPlatform => "该平台不支持使用此插件".to_string(),
        ToggleOutcome::PermissionDenied => "你没有权限使用此功能".to_string(),
        ToggleOutcome::Unchanged(_) if desired => "你已经设置为订阅状态了哦~".to_string(),
        ToggleOutcome::Unchanged(_) => "你已经取消订阅状态了哦~".to_string(),
        ToggleOutcome::Created(_) | ToggleOutcome::Updated(_) if desired => {
            format!("将 [*{}*] 设置为BOT订阅状态", username)
        }
        ToggleOutcome::Created(_) | ToggleOutcome::Updated(_) => {
            format!("将 [*{}*] 设置为BOT取消订阅状态", username)
        }
    };

    format!("{}{}", REPLY_PREFIX, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::models::SubscriptionModel;

    #[test]
    fn test_confirmation_names_the_user() {
        let created = ToggleOutcome::Created(SubscriptionModel::new("u1", true));
        assert_eq!(
            render(&created, "alice", true),
            " [IIROSE-Subscribe] 将 [*alice*] 设置为BOT订阅状态"
        );

        let updated = ToggleOutcome::Updated(SubscriptionModel::new("u1", false));
        assert_eq!(
            render(&updated, "alice", false),
            " [IIROSE-Subscribe] 将 [*alice*] 设置为BOT取消订阅状态"
        );
    }

    #[test]
    fn test_noop_reply_depends_on_direction() {
        let on = ToggleOutcome::Unchanged(SubscriptionModel::new("u1", true));
        let off = ToggleOutcome::Unchanged(SubscriptionModel::new("u1", false));

        assert!(render(&on, "alice", true).ends_with("你已经设置为订阅状态了哦~"));
        assert!(render(&off, "alice", false).ends_with("你已经取消订阅状态了哦~"));
    }

    #[test]
    fn test_denials_carry_prefix() {
        assert_eq!(
            render(&ToggleOutcome::PermissionDenied, "x", true),
            " [IIROSE-Subscribe] 你没有权限使用此功能"
        );
        assert_eq!(
            render(&ToggleOutcome::UnsupportedPlatform, "x", false),
            " [IIROSE-Subscribe] 该平台不支持使用此插件"
        );
    }
}

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use strum::IntoEnumIterator;
use tower_http::trace::TraceLayer;

use crate::{command::SubscriptionCommand, gateway::gateway_handler, shared::AppState};

pub const USAGE: &str = "\
# 快速说明
1. 在群内发送iirose.sub.on，将会订阅BOT的消息
2. 在群内发送iirose.sub.off，将会取消订阅BOT的消息
3. 订阅状态会在数据库中保存，不会因为重启而消失
4. 本插件只会在iirose中生效
5. adminList为管理员列表，需要填写用户的唯一标识(如:5b0fe8a3b1ff2)，只有管理员才能使用订阅功能
# 注意事项
开启订阅状态后，私聊bot发送内容，会被转发到群内
开启订阅状态后，群内发送内容，会被转发到私聊bot
关闭订阅状态后，不会再转发消息";

/// Usage text followed by the command list for the configured prefix
pub fn usage_text(command_prefix: &str) -> String {
    let commands: Vec<String> = SubscriptionCommand::iter()
        .map(|command| format!("{}.{}  {}", command_prefix, command, command.description()))
        .collect();

    format!("{}\n# 指令\n{}", USAGE, commands.join("\n"))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub platform: String,
    pub gateway_connected: bool,
}

/// Builds the HTTP router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/usage", get(usage))
        .route("/gateway", get(gateway_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /usage
async fn usage(State(state): State<AppState>) -> String {
    usage_text(&state.config.command_prefix)
}

/// GET /
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let gateway_connected = state
        .connection_manager
        .is_connected(&state.config.platform)
        .await;

    Json(HealthResponse {
        status: "ok",
        platform: state.config.platform.clone(),
        gateway_connected,
    })
}

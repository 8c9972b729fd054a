use async_trait::async_trait;
use axum::{
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::{
    messages::GatewayFrame,
    socket::{Connection, FrameHandler},
};
use crate::{dispatch::EventDispatcher, shared::AppState};

/// Frame handler that feeds adapter messages into the dispatcher
///
/// Every valid message is processed on its own task so a slow store or send
/// never holds up the connection.
pub struct GatewayReceiveHandler {
    dispatcher: Arc<EventDispatcher>,
}

impl GatewayReceiveHandler {
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl FrameHandler for GatewayReceiveHandler {
    async fn handle_frame(&self, platform: &str, frame: String) -> Option<String> {
        let message = match GatewayFrame::parse(&frame).and_then(|f| f.into_inbound_message()) {
            Ok(message) => message,
            Err(e) => {
                warn!(platform = %platform, error = %e, "Rejected gateway frame");
                return GatewayFrame::error(e.to_string()).to_json().ok();
            }
        };

        let dispatcher = Arc::clone(&self.dispatcher);
        tokio::spawn(async move {
            if let Err(e) = dispatcher.dispatch(&message).await {
                warn!(
                    user_id = %message.user_id,
                    channel_id = %message.channel_id,
                    error = %e,
                    "Failed to handle inbound message"
                );
            }
        });

        None
    }
}

#[derive(Debug, Deserialize)]
pub struct GatewayParams {
    pub platform: Option<String>,
}

/// WebSocket endpoint for the platform adapter
///
/// GET /gateway?platform=iirose
pub async fn gateway_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<GatewayParams>,
    State(state): State<AppState>,
) -> Response {
    let platform = params
        .platform
        .unwrap_or_else(|| state.config.platform.clone());

    info!(platform = %platform, "Gateway connection requested");

    ws.on_upgrade(move |socket| handle_socket(socket, platform, state))
}

async fn handle_socket(socket: WebSocket, platform: String, state: AppState) {
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state
        .connection_manager
        .add_gateway(platform.clone(), tx)
        .await;

    let frame_handler = Arc::new(GatewayReceiveHandler::new(state.dispatcher.clone()));
    let connection = Connection::new(
        connection_id.clone(),
        platform.clone(),
        Box::new(socket),
        rx,
        frame_handler,
    );

    if let Err(e) = connection.run().await {
        warn!(platform = %platform, connection_id = %connection_id, error = ?e, "Gateway connection ended with error");
    }

    state
        .connection_manager
        .remove_gateway(&platform, &connection_id)
        .await;
}

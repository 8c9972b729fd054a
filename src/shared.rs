use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::RelayConfig;
use crate::dispatch::EventDispatcher;
use crate::gateway::ConnectionManager;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub dispatcher: Arc<EventDispatcher>,
}

impl AppState {
    pub fn new(
        config: Arc<RelayConfig>,
        connection_manager: Arc<dyn ConnectionManager>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            config,
            connection_manager,
            dispatcher,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Configuration error: {}", msg),
            ),
            AppError::SendFailed(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::InvalidFrame(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

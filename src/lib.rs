// Library crate for the room relay bot
// This file exposes the public API for integration tests

pub mod app;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod gateway;
pub mod platform;
pub mod relay;
pub mod shared;
pub mod subscription;

// Re-export commonly used types for easier access in tests
pub use app::build_router;
pub use config::RelayConfig;
pub use dispatch::{DispatchOutcome, EventDispatcher};
pub use platform::{Bot, Destination, InboundMessage, Origin};
pub use shared::{AppError, AppState};
pub use subscription::{
    repository::{InMemorySubscriptionRepository, SubscriptionRepository},
    SubscriptionModel,
};

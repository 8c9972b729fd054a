// Public API - what other modules can use
pub use models::SubscriptionModel;
pub use service::SubscriptionService;
pub use types::ToggleOutcome;

// Internal modules
pub mod models;
pub mod replies;
pub mod repository;
mod service;
mod types;

// Public API - what other modules can use
pub use handler::CommandHandler;
pub use parser::{parse_command, SubscriptionCommand};

// Internal modules
mod handler;
mod parser;

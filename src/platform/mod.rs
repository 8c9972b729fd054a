// Chat platform surface: where messages come from and where they can be sent

// Public API - what other modules can use
pub use bot::Bot;
pub use destination::Destination;
pub use session::{InboundMessage, Origin};

// Internal modules
mod bot;
mod destination;
mod session;

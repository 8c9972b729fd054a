// Bridge to the platform adapter: a WebSocket carrying JSON frames both ways

// Public API
pub use bot::GatewayBot;
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use handler::{gateway_handler, GatewayReceiveHandler};
pub use messages::{FrameType, GatewayFrame, SendPayload};
pub use socket::{Connection, FrameHandler, SocketWrapper};

// Internal modules
mod bot;
mod connection_manager;
mod handler;
pub mod messages;
mod socket;

// Bidirectional forwarding between the public room and subscribers' private channels

// Public API - what other modules can use
pub use listener::MessageRelay;
pub use planner::{mention, plan_relay, relay_text, RelayPolicy, SendInstruction};

// Internal modules
mod listener;
mod planner;

//! WebSocket change stream for the admin dashboard.
//!
//! Provides connection management, heartbeat monitoring, the HTTP upgrade
//! handler, and the task that turns lead changes into pushed messages.

mod changes;
mod handler;
mod heartbeat;
pub mod manager;

pub use changes::{start_change_forwarder, ChangeMessage, CHANGE_MESSAGE_TYPE};
pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;

//! Change notification and outbound lead notification for the estate
//! waitlist.
//!
//! - [`EventBus`]: in-process fan-out of [`LeadChange`]s backed by
//!   `tokio::sync::broadcast`.
//! - [`ChangeFeed`] / [`Subscription`]: the "call me on every change"
//!   contract the dashboard and the WebSocket stream consume.
//! - [`delivery`]: SMTP email and function-endpoint delivery of new-lead
//!   notifications.

pub mod bus;
pub mod delivery;
pub mod feed;

pub use bus::{ChangeKind, EventBus, LeadChange};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use delivery::notification::{
    render_email, EmailNotifier, FunctionNotifier, LeadNotification, Notifier, NotifyError,
    RenderedEmail,
};
pub use feed::{ChangeCallback, ChangeFeed, Subscription};

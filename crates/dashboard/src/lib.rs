//! Client-side state for the waitlist's two surfaces.
//!
//! - [`board::LeadBoard`] -- the admin leads table: cached list, budget
//!   filter, live reload, status changes, CSV export, email copy.
//! - [`form::IntakeForm`] -- the public waitlist form's submission flow.
//!
//! Both talk to the server through [`backend::LeadBackend`];
//! [`http::HttpBackend`] and [`live::WsChangeFeed`] are the network
//! implementations.

pub mod backend;
pub mod board;
pub mod clipboard;
pub mod form;
pub mod http;
pub mod live;
pub mod notice;
pub mod share;

pub use backend::{BackendError, LeadBackend};
pub use board::{BoardStats, CsvDownload, LeadBoard};
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use form::{IntakeForm, SubmitOutcome, SubmitPhase};
pub use http::{HttpBackend, Session, SessionUser};
pub use live::WsChangeFeed;
pub use notice::{Notice, NoticeTone};

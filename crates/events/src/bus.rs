//! In-process change bus backed by a `tokio::sync::broadcast` channel.
//!
//! Every write to the lead store ends up here as a [`LeadChange`], either
//! published directly by the in-memory store or forwarded from PostgreSQL
//! `NOTIFY` by the listener. Shared via `Arc<EventBus>`.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use estate_core::types::{LeadId, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// LeadChange
// ---------------------------------------------------------------------------

/// What happened to a lead row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts both the wire value and a trigger's `TG_OP` (`INSERT`, ...).
impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "insert" => Ok(Self::Insert),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(format!("unknown change kind '{other}'")),
        }
    }
}

/// A single change to the lead table.
///
/// Consumers treat every change the same way (re-fetch everything), so the
/// payload only identifies the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadChange {
    pub kind: ChangeKind,
    pub lead_id: LeadId,
    /// When the change was observed (UTC).
    pub at: Timestamp,
}

impl LeadChange {
    pub fn new(kind: ChangeKind, lead_id: LeadId) -> Self {
        Self {
            kind,
            lead_id,
            at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out bus for [`LeadChange`]s.
///
/// When the buffer is full the oldest un-consumed changes are dropped and
/// slow receivers observe `RecvError::Lagged`.
pub struct EventBus {
    sender: broadcast::Sender<LeadChange>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change to all current receivers.
    ///
    /// Dropped silently when nobody is listening.
    pub fn publish(&self, change: LeadChange) {
        let kind = change.kind;
        let lead_id = change.lead_id;
        match self.sender.send(change) {
            Ok(receivers) => {
                tracing::trace!(%kind, %lead_id, receivers, "Lead change published");
            }
            Err(_) => {
                tracing::trace!(%kind, %lead_id, "Lead change dropped, no receivers");
            }
        }
    }

    /// A raw receiver of every change published from now on.
    pub fn receiver(&self) -> broadcast::Receiver<LeadChange> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Pushes every lead change on the bus to connected dashboards.

use std::sync::Arc;

use axum::extract::ws::Message;
use estate_core::types::LeadId;
use estate_events::{ChangeKind, EventBus, LeadChange};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use crate::ws::manager::WsManager;

pub const CHANGE_MESSAGE_TYPE: &str = "leads.changed";

/// Wire form of a change notification.
///
/// Clients treat every message the same way (reload), so `kind` and
/// `lead_id` are informational. Both are absent when the forwarder fell
/// behind and lost track of which changes it skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChangeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<LeadId>,
}

impl ChangeMessage {
    pub fn from_change(change: &LeadChange) -> Self {
        Self {
            message_type: CHANGE_MESSAGE_TYPE.to_string(),
            kind: Some(change.kind),
            lead_id: Some(change.lead_id),
        }
    }

    pub fn unspecified() -> Self {
        Self {
            message_type: CHANGE_MESSAGE_TYPE.to_string(),
            kind: None,
            lead_id: None,
        }
    }

    fn to_ws(&self) -> Option<Message> {
        match serde_json::to_string(self) {
            Ok(json) => Some(Message::Text(json.into())),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize change message");
                None
            }
        }
    }
}

/// Spawn the task that forwards bus changes to every WebSocket connection
/// until `cancel` fires or the bus closes.
pub fn start_change_forwarder(
    bus: Arc<EventBus>,
    ws_manager: Arc<WsManager>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    let mut rx = bus.receiver();
    tokio::spawn(async move {
        loop {
            let message = tokio::select! {
                _ = cancel.cancelled() => break,
                received = rx.recv() => match received {
                    Ok(change) => ChangeMessage::from_change(&change),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Change forwarder lagged");
                        ChangeMessage::unspecified()
                    }
                    Err(RecvError::Closed) => break,
                },
            };
            if let Some(ws_message) = message.to_ws() {
                ws_manager.broadcast(ws_message).await;
            }
        }
        tracing::debug!("Change forwarder stopped");
    })
}

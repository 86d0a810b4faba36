//! Forwards PostgreSQL `lead_changes` notifications onto the [`EventBus`].

use std::sync::Arc;
use std::time::Duration;

use estate_events::{ChangeKind, EventBus, LeadChange};
use serde::Deserialize;
use sqlx::postgres::PgListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::DbPool;

/// Channel the `leads` trigger notifies on.
pub const LEAD_CHANGES_CHANNEL: &str = "lead_changes";

/// Pause after a receive error before trying again.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Trigger payload: `{"op": "INSERT", "id": "<uuid>"}`.
#[derive(Debug, Deserialize)]
struct TriggerPayload {
    op: String,
    id: uuid::Uuid,
}

/// Decode one notification payload.
pub fn parse_payload(payload: &str) -> Result<LeadChange, String> {
    let raw: TriggerPayload =
        serde_json::from_str(payload).map_err(|e| format!("invalid payload: {e}"))?;
    let kind: ChangeKind = raw.op.parse()?;
    Ok(LeadChange::new(kind, raw.id))
}

/// Start listening on [`LEAD_CHANGES_CHANNEL`] and republish every change on
/// `bus` until `cancel` fires.
pub async fn spawn_change_listener(
    pool: &DbPool,
    bus: Arc<EventBus>,
    cancel: CancellationToken,
) -> Result<JoinHandle<()>, sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(LEAD_CHANGES_CHANNEL).await?;
    tracing::info!(channel = LEAD_CHANGES_CHANNEL, "Listening for lead changes");

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                received = listener.recv() => match received {
                    Ok(notification) => match parse_payload(notification.payload()) {
                        Ok(change) => bus.publish(change),
                        Err(e) => tracing::warn!(error = %e, "Ignoring lead change notification"),
                    },
                    Err(e) => {
                        tracing::error!(error = %e, "Lead change listener error");
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                },
            }
        }
        tracing::info!("Lead change listener stopped");
    }))
}

//! Lead intake: validate, insert, then notify without waiting.

use std::sync::Arc;

use chrono::NaiveDate;
use estate_core::error::CoreError;
use estate_core::lead::Lead;
use estate_core::validation::{validate_lead_form, LeadForm};
use estate_db::LeadStore;
use estate_events::{LeadNotification, Notifier};
use tokio::task::JoinHandle;

use crate::error::AppResult;

/// Run one submission.
///
/// A form that fails validation never reaches the store. The notification
/// is spawned only after a successful insert, and its outcome is logged
/// and otherwise dropped. The returned handle lets callers that care (tests)
/// wait for delivery; request handlers ignore it.
pub async fn submit_lead(
    store: &dyn LeadStore,
    notifier: Option<Arc<dyn Notifier>>,
    form: &LeadForm,
    today: NaiveDate,
) -> AppResult<(Lead, Option<JoinHandle<()>>)> {
    let new_lead = validate_lead_form(form, today).map_err(CoreError::InvalidForm)?;

    let lead = store.insert(new_lead).await?;
    tracing::info!(lead_id = %lead.id, budget = %lead.budget_range.as_str(), "Lead captured");

    let delivery = match notifier {
        Some(notifier) => Some(spawn_notification(notifier, LeadNotification::from(&lead))),
        None => {
            tracing::debug!(lead_id = %lead.id, "No notifier configured, skipping");
            None
        }
    };

    Ok((lead, delivery))
}

fn spawn_notification(notifier: Arc<dyn Notifier>, payload: LeadNotification) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify(&payload).await {
            Ok(()) => tracing::debug!("Lead notification delivered"),
            Err(e) => tracing::warn!(error = %e, "Lead notification failed"),
        }
    })
}

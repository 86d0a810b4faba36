//! The new-lead notification function.
//!
//! Called by the intake flow (through `FunctionNotifier`) or by any other
//! client that wants the admin emailed about a lead. Failures of any kind
//! collapse into one generic message so provider details never leak.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use estate_events::LeadNotification;
use serde_json::{json, Value};

use crate::state::AppState;

pub const FAILURE_MESSAGE: &str = "Unable to send notification. Please try again later.";

fn failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": FAILURE_MESSAGE })),
    )
}

/// POST /functions/send-lead-notification
pub async fn send_lead_notification(
    State(state): State<AppState>,
    payload: Result<Json<LeadNotification>, JsonRejection>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Json(lead) = payload.map_err(|e| {
        tracing::warn!(error = %e, "Rejected notification payload");
        failure()
    })?;

    let Some(mailer) = state.function_mailer.as_ref() else {
        tracing::error!("Notification requested but no mailer is configured");
        return Err(failure());
    };

    mailer.notify(&lead).await.map_err(|e| {
        tracing::error!(error = %e, "Lead notification email failed");
        failure()
    })?;

    Ok(Json(json!({ "success": true })))
}

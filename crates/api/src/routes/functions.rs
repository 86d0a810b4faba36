use axum::routing::post;
use axum::Router;

use crate::handlers::notify_function;
use crate::state::AppState;

/// Serverless-style function routes (root level, NOT under `/api/v1`).
///
/// ```text
/// POST   /functions/send-lead-notification
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/functions/send-lead-notification",
        post(notify_function::send_lead_notification),
    )
}

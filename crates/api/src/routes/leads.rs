use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Lead routes, mounted at `/leads`.
///
/// ```text
/// POST   /               -> create_lead (public)
/// GET    /               -> list_leads (?budget)
/// GET    /export         -> export_leads (?budget)
/// GET    /stats          -> lead_stats
/// PATCH  /{id}/status    -> update_lead_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list_leads).post(leads::create_lead))
        .route("/export", get(leads::export_leads))
        .route("/stats", get(leads::lead_stats))
        .route("/{id}/status", patch(leads::update_lead_status))
}

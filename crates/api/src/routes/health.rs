use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the lead store is reachable.
    pub store_healthy: bool,
    /// Open dashboard WebSocket connections.
    pub ws_connections: usize,
}

/// GET /health -- returns service and store health.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store_healthy = match state.leads.health().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Lead store health check failed");
            false
        }
    };

    let (code, status) = if store_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store_healthy,
            ws_connections: state.ws_manager.connection_count().await,
        }),
    )
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

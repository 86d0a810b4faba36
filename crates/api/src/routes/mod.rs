pub mod auth;
pub mod functions;
pub mod health;
pub mod leads;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws?token=                                       WebSocket change stream (admin)
///
/// /auth/signup                                     create member (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user (requires auth)
///
/// /leads                                           submit (public), list (admin)
/// /leads/export                                    CSV download (admin)
/// /leads/stats                                     stats + growth + recent (admin)
/// /leads/{id}/status                               update status (admin)
///
/// /share                                           public form links (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/leads", leads::router())
        .route("/share", get(handlers::share::get_share_links))
}

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Staff authentication routes, mounted at `/auth`.
///
/// ```text
/// POST   /signup   -> signup
/// POST   /login    -> login
/// GET    /me       -> me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}

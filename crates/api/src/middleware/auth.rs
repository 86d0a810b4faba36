//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use estate_core::error::CoreError;
use estate_core::roles::ROLE_ADMIN;
use estate_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated staff user extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// This value is the request's session: handlers receive it explicitly
/// rather than reading any shared current-user state.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (`"admin"` or `"member"`).
    pub role: String,
}

impl AuthUser {
    /// Decode a raw token into a session. Used by the Bearer extractor and
    /// by the WebSocket upgrade, which carries the token in the query.
    pub fn from_token(token: &str, jwt: &JwtConfig) -> Result<Self, AppError> {
        let claims = validate_token(token, jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;
        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        AuthUser::from_token(token, &state.config.jwt)
    }
}

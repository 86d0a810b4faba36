//! Handlers for the `/auth` resource (signup, login, current user).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use estate_core::error::CoreError;
use estate_core::roles::ROLE_MEMBER;
use estate_db::models::staff_user::{CreateStaffUser, StaffUserResponse};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_against_dummy, verify_password,
    MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: StaffUserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create a `member` account. Disabled with 403 when signups are closed.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<StaffUserResponse>>)> {
    if !state.config.allow_signup {
        return Err(AppError::Core(CoreError::Forbidden(
            "Sign up is disabled".into(),
        )));
    }

    let email = input.email.trim().to_string();
    if !email.validate_email() {
        return Err(AppError::Core(CoreError::Validation(
            "Please enter a valid email address".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = state
        .staff
        .create(CreateStaffUser {
            email,
            password_hash,
            role: ROLE_MEMBER.to_string(),
        })
        .await?;

    tracing::info!(user_id = user.id, "Staff account created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: StaffUserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let Some(user) = state.staff.find_by_email(input.email.trim()).await? else {
        verify_against_dummy(&input.password);
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "Staff signed in");
    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: StaffUserResponse::from(&user),
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    RequireAuth(session): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StaffUserResponse>>> {
    let user = state
        .staff
        .find_by_id(session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(DataResponse {
        data: StaffUserResponse::from(&user),
    }))
}

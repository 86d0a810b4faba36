//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests call `IntoResponse` directly on `AppError` values; no HTTP
//! server is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use estate_api::error::AppError;
use estate_core::error::{CoreError, FieldErrors};
use estate_db::StoreError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Lead",
        id: "42".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Lead with id 42 not found");
}

#[tokio::test]
async fn invalid_form_returns_422_with_fields() {
    let mut fields = FieldErrors::new();
    fields.add("email", "Please enter a valid email address");
    fields.add("phone", "Please enter a valid phone number");

    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidForm(fields))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["email"], "Please enter a valid email address");
    assert_eq!(json["fields"]["phone"], "Please enter a valid phone number");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("No leads to export".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json.get("fields").is_none());
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("invalid field value".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

#[tokio::test]
async fn store_conflict_returns_409() {
    let err = AppError::Store(StoreError::Conflict(
        "An account with this email already exists".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn malformed_row_is_a_sanitized_500() {
    let err = AppError::Store(StoreError::MalformedRow {
        id: "abc".into(),
        reason: "unknown budget range 'cheap'".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn database_errors_are_sanitized() {
    let err = AppError::Store(StoreError::Database(sqlx::Error::PoolTimedOut));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let err = AppError::Store(StoreError::Database(sqlx::Error::RowNotFound));

    let (status, _) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unauthorized_and_forbidden() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("Missing token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("Admin role required".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("secret"));
}

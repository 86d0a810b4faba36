//! Handlers for the `/leads` resource.
//!
//! Submission is public; everything else requires an admin session.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{NaiveDate, Utc};
use estate_core::error::CoreError;
use estate_core::export::{build_csv, export_filename};
use estate_core::lead::Lead;
use estate_core::stats::{compute_stats, growth_series, recent, GrowthPoint, LeadStats, RECENT_LIMIT};
use estate_core::status::LeadStatus;
use estate_core::types::LeadId;
use estate_core::validation::lead_form_from_json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::intake::submit_lead;
use crate::middleware::rbac::RequireAdmin;
use crate::query::BudgetParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PATCH /leads/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Response body for `GET /leads/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: LeadStats,
    /// One point per day, oldest first, ending today.
    pub growth: Vec<GrowthPoint>,
    pub recent: Vec<Lead>,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// POST /api/v1/leads
///
/// Public waitlist submission. Returns 201 with the stored lead, or 422
/// with per-field messages, including for fields of the wrong JSON type.
pub async fn create_lead(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<Lead>>)> {
    let Json(body) = body.map_err(|e| {
        tracing::debug!(error = %e, "Unreadable lead submission body");
        AppError::Core(CoreError::Validation(format!("Invalid request body: {}", e.body_text())))
    })?;
    let form = lead_form_from_json(body).map_err(CoreError::InvalidForm)?;
    let (lead, _delivery) =
        submit_lead(state.leads.as_ref(), state.notifier.clone(), &form, today()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// GET /api/v1/leads?budget=
pub async fn list_leads(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<BudgetParams>,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let filter = params.filter()?;
    let leads = state.leads.list().await?;
    let data = filter.apply(&leads).into_iter().cloned().collect();
    Ok(Json(DataResponse { data }))
}

/// PATCH /api/v1/leads/{id}/status
///
/// Any status may follow any other.
pub async fn update_lead_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<LeadId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let status = input
        .status
        .parse::<LeadStatus>()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let lead = state
        .leads
        .update_status(id, status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Lead",
                id: id.to_string(),
            })
        })?;

    tracing::info!(lead_id = %id, status = %status.as_str(), user_id = admin.user_id, "Lead status updated");
    Ok(Json(DataResponse { data: lead }))
}

/// GET /api/v1/leads/export?budget=
///
/// CSV download of the filtered leads. 400 when nothing matches.
pub async fn export_leads(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<BudgetParams>,
) -> AppResult<Response> {
    let filter = params.filter()?;
    let leads = state.leads.list().await?;
    let csv = build_csv(filter.apply(&leads))?;
    let disposition = format!("attachment; filename=\"{}\"", export_filename(today()));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

/// GET /api/v1/leads/stats
pub async fn lead_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StatsResponse>>> {
    let leads = state.leads.list().await?;
    let data = StatsResponse {
        stats: compute_stats(&leads),
        growth: growth_series(&leads, today()),
        recent: recent(&leads, RECENT_LIMIT).to_vec(),
    };
    Ok(Json(DataResponse { data }))
}

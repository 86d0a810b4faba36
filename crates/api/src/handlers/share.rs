//! Handler for the share panel.

use axum::extract::State;
use axum::Json;
use estate_core::share::ShareLinks;

use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/share
///
/// Link, display text and embed snippet for the public form.
pub async fn get_share_links(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Json<DataResponse<ShareLinks>> {
    Json(DataResponse {
        data: ShareLinks::new(&state.config.public_form_url),
    })
}

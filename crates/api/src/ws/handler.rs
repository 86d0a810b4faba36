use std::sync::Arc;

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use estate_core::error::CoreError;
use estate_core::types::DbId;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Browsers cannot set headers on a WebSocket handshake, so the access
/// token travels in the query string.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: Option<String>,
}

fn authorize(params: &WsParams, state: &AppState) -> Result<RequireAdmin, AppError> {
    let token = params.token.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Missing token query parameter".into()))
    })?;
    RequireAdmin::check(AuthUser::from_token(token, &state.config.jwt)?)
}

/// HTTP handler that upgrades an admin's connection to WebSocket.
///
/// The token is checked before the upgrade so unauthenticated clients get
/// a plain 401/403 response. After the upgrade the connection is
/// registered with `WsManager` and managed by two tasks (sender + receiver).
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let RequireAdmin(user) = match authorize(&params, &state) {
        Ok(admin) => admin,
        Err(e) => return e.into_response(),
    };
    match ws {
        Ok(ws) => ws
            .on_upgrade(move |socket| handle_socket(socket, user.user_id, state.ws_manager))
            .into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Drains inbound messages on the current task until close.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, user_id: DbId, ws_manager: Arc<WsManager>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone(), user_id).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // The stream is push-only; inbound frames other than close are ignored.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

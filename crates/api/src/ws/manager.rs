use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use estate_core::types::{DbId, Timestamp};
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// The staff user who opened the connection.
    pub user_id: DbId,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String, user_id: DbId) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        if let Some(conn) = self.connections.write().await.remove(conn_id) {
            let open_for = chrono::Utc::now() - conn.connected_at;
            tracing::debug!(
                conn_id,
                user_id = conn.user_id,
                open_secs = open_for.num_seconds(),
                "WebSocket connection removed"
            );
        }
    }

    /// Broadcast a message to all connected clients.
    ///
    /// Connections whose send channels are closed are silently skipped
    /// (they will be cleaned up on their next receive loop iteration).
    pub async fn broadcast(&self, message: Message) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(message.clone());
        }
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}

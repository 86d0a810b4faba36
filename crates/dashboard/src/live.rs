//! [`ChangeFeed`] over the server's WebSocket change stream.
//!
//! Every text frame counts as one change. After each (re)connect the
//! callback also fires once, since changes made while disconnected were
//! not seen. Dropped connections are retried with exponential backoff.

use std::time::Duration;

use estate_events::{ChangeCallback, ChangeFeed, Subscription};
use futures::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

/// Tunable parameters for the reconnect backoff.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Delay before the first reconnection attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

/// Calculate the next backoff delay, clamped to `max_delay`.
pub fn next_delay(current: Duration, config: &ReconnectConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// `http(s)://host` to `ws(s)://host/api/v1/ws?token=...`.
pub fn change_stream_url(base_url: &str, token: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    format!("{ws_base}/api/v1/ws?token={token}")
}

pub struct WsChangeFeed {
    url: String,
    reconnect: ReconnectConfig,
}

impl WsChangeFeed {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            url: change_stream_url(base_url, access_token),
            reconnect: ReconnectConfig::default(),
        }
    }

    pub fn with_reconnect(mut self, reconnect: ReconnectConfig) -> Self {
        self.reconnect = reconnect;
        self
    }
}

impl ChangeFeed for WsChangeFeed {
    fn subscribe(&self, on_change: ChangeCallback) -> Subscription {
        let cancel = CancellationToken::new();
        tokio::spawn(run_feed(
            self.url.clone(),
            self.reconnect.clone(),
            on_change,
            cancel.clone(),
        ));
        Subscription::new(cancel)
    }
}

async fn run_feed(
    url: String,
    config: ReconnectConfig,
    on_change: ChangeCallback,
    cancel: CancellationToken,
) {
    let mut delay = config.initial_delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let connected = tokio::select! {
            _ = cancel.cancelled() => break,
            result = connect_async(url.as_str()) => result,
        };

        match connected {
            Ok((mut stream, _response)) => {
                tracing::info!(attempt, "Change stream connected");
                attempt = 0;
                delay = config.initial_delay;
                on_change();

                loop {
                    let frame = tokio::select! {
                        _ = cancel.cancelled() => {
                            let _ = stream.close(None).await;
                            tracing::debug!("Change stream closed by subscriber");
                            return;
                        }
                        frame = stream.next() => frame,
                    };
                    match frame {
                        Some(Ok(Message::Text(_))) => on_change(),
                        Some(Ok(Message::Close(_))) | None => {
                            tracing::warn!("Change stream closed by server");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "Change stream error");
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Change stream connect failed");
            }
        }

        // Wait before the next attempt, respecting cancellation.
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
        delay = next_delay(delay, &config);
    }
    tracing::debug!("Change stream task ended");
}

use std::sync::Arc;

use estate_db::{LeadStore, StaffStore};
use estate_events::{EmailDelivery, EmailNotifier, EventBus, FunctionNotifier, Notifier};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Lead storage (PostgreSQL or in-memory).
    pub leads: Arc<dyn LeadStore>,
    /// Staff accounts.
    pub staff: Arc<dyn StaffStore>,
    /// Lead change notifications, fed by the store (or its trigger listener).
    pub event_bus: Arc<EventBus>,
    /// WebSocket connection manager (dashboard clients).
    pub ws_manager: Arc<WsManager>,
    /// Channel the intake flow uses to tell staff about a new lead. `None`
    /// skips notification.
    pub notifier: Option<Arc<dyn Notifier>>,
    /// Mailer behind `POST /functions/send-lead-notification`. `None`
    /// makes that endpoint fail with its generic error.
    pub function_mailer: Option<Arc<dyn Notifier>>,
}

impl AppState {
    /// Assemble state around the given stores, wiring notification channels
    /// from configuration.
    ///
    /// The intake notifier prefers the function URL and falls back to
    /// emailing directly; the function endpoint always emails directly.
    pub fn new(
        config: ServerConfig,
        leads: Arc<dyn LeadStore>,
        staff: Arc<dyn StaffStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let function_mailer = email_notifier(&config);
        let notifier = match config.notify_function_url.as_deref() {
            Some(url) => match FunctionNotifier::new(url) {
                Ok(n) => Some(Arc::new(n) as Arc<dyn Notifier>),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to build notification client");
                    None
                }
            },
            None => function_mailer.clone(),
        };
        if notifier.is_none() {
            tracing::warn!("No lead notification channel configured");
        }

        Self {
            config: Arc::new(config),
            leads,
            staff,
            event_bus,
            ws_manager: Arc::new(WsManager::new()),
            notifier,
            function_mailer,
        }
    }
}

fn email_notifier(config: &ServerConfig) -> Option<Arc<dyn Notifier>> {
    match (&config.smtp, &config.notify_recipient) {
        (Some(smtp), Some(recipient)) => Some(Arc::new(EmailNotifier::new(
            EmailDelivery::new(smtp.clone()),
            recipient.clone(),
        ))),
        _ => None,
    }
}

//! New-lead notification: payload, rendering and delivery channels.
//!
//! The intake flow fires a [`Notifier`] after a successful insert and never
//! waits on or reports its outcome to the visitor. Two channels exist:
//! [`FunctionNotifier`] posts the payload to the notification function
//! endpoint, [`EmailNotifier`] renders and sends the email itself.

use std::time::Duration;

use async_trait::async_trait;
use estate_core::html::escape_html;
use estate_core::lead::Lead;
use estate_core::validation::DATE_FORMAT;
use serde::{Deserialize, Serialize};

use super::email::{EmailDelivery, EmailError};

/// HTTP request timeout for a single function call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The function call failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The function endpoint returned a non-2xx status code.
    #[error("Notification function returned HTTP {0}")]
    HttpStatus(u16),

    #[error(transparent)]
    Email(#[from] EmailError),
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Body of a notification request. Field names match the public function
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadNotification {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub budget_range: String,
    /// `YYYY-MM-DD`.
    pub move_in_date: String,
    pub neighborhoods: Vec<String>,
}

impl From<&Lead> for LeadNotification {
    fn from(lead: &Lead) -> Self {
        Self {
            full_name: lead.full_name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            budget_range: lead.budget_range.as_str().to_string(),
            move_in_date: lead.move_in_date.format(DATE_FORMAT).to_string(),
            neighborhoods: lead.neighborhoods.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

const CELL_LABEL: &str = r#"style="padding: 8px; border: 1px solid #ddd; font-weight: bold;""#;
const CELL_VALUE: &str = r#"style="padding: 8px; border: 1px solid #ddd;""#;

/// Render the admin email. Every interpolated value is HTML-escaped.
pub fn render_email(lead: &LeadNotification) -> RenderedEmail {
    let name = escape_html(&lead.full_name);
    let neighborhoods = lead
        .neighborhoods
        .iter()
        .map(|n| escape_html(n))
        .collect::<Vec<_>>()
        .join(", ");

    let rows = [
        ("Name", name.clone()),
        ("Email", escape_html(&lead.email)),
        ("Phone", escape_html(&lead.phone)),
        ("Budget", escape_html(&lead.budget_range)),
        ("Move-in Date", escape_html(&lead.move_in_date)),
        ("Neighborhoods", neighborhoods),
    ]
    .iter()
    .map(|(label, value)| {
        format!("<tr><td {CELL_LABEL}>{label}</td><td {CELL_VALUE}>{value}</td></tr>")
    })
    .collect::<String>();

    let html = format!(
        "<h1>New Waitlist Submission</h1>\
         <p>A new lead has joined the Priority Access Waitlist.</p>\
         <h2>Lead Details</h2>\
         <table style=\"border-collapse: collapse; width: 100%; max-width: 500px;\">{rows}</table>"
    );

    RenderedEmail {
        subject: format!("New Waitlist Lead: {name}"),
        html,
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Something that can tell staff about a new lead.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, lead: &LeadNotification) -> Result<(), NotifyError>;
}

/// Posts the notification to the function endpoint.
pub struct FunctionNotifier {
    client: reqwest::Client,
    url: String,
}

impl FunctionNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Notifier for FunctionNotifier {
    async fn notify(&self, lead: &LeadNotification) -> Result<(), NotifyError> {
        let response = self.client.post(&self.url).json(lead).send().await?;
        if !response.status().is_success() {
            return Err(NotifyError::HttpStatus(response.status().as_u16()));
        }
        tracing::debug!(url = %self.url, "Lead notification function called");
        Ok(())
    }
}

/// Sends the rendered email straight to the admin recipient over SMTP.
pub struct EmailNotifier {
    delivery: EmailDelivery,
    recipient: String,
}

impl EmailNotifier {
    pub fn new(delivery: EmailDelivery, recipient: impl Into<String>) -> Self {
        Self {
            delivery,
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, lead: &LeadNotification) -> Result<(), NotifyError> {
        let email = render_email(lead);
        self.delivery
            .send_html(&self.recipient, &email.subject, email.html)
            .await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! The server as the dashboard sees it.

use async_trait::async_trait;
use estate_core::error::FieldErrors;
use estate_core::lead::Lead;
use estate_core::share::ShareLinks;
use estate_core::status::LeadStatus;
use estate_core::types::LeadId;
use estate_core::validation::LeadForm;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never got a response (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an error body.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The server rejected the submission field by field.
    #[error("Please correct the highlighted fields")]
    InvalidForm(FieldErrors),

    /// An admin call was made without a session.
    #[error("Not signed in")]
    Unauthenticated,

    /// A response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Lead operations the dashboard and the public form need.
#[async_trait]
pub trait LeadBackend: Send + Sync {
    /// Submit the public form. Public; needs no session.
    async fn submit_lead(&self, form: &LeadForm) -> Result<Lead, BackendError>;

    /// Every lead, newest first.
    async fn list_leads(&self) -> Result<Vec<Lead>, BackendError>;

    async fn update_status(&self, id: LeadId, status: LeadStatus) -> Result<Lead, BackendError>;

    async fn share_links(&self) -> Result<ShareLinks, BackendError>;
}

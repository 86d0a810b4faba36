//! [`LeadBackend`] over the REST API, using [`reqwest`].

use async_trait::async_trait;
use estate_core::error::FieldErrors;
use estate_core::lead::Lead;
use estate_core::share::ShareLinks;
use estate_core::status::LeadStatus;
use estate_core::types::{DbId, LeadId};
use estate_core::validation::LeadForm;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::{BackendError, LeadBackend};

/// The signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    pub id: DbId,
    pub email: String,
    pub role: String,
}

/// An authenticated session, passed explicitly to whatever needs it.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    /// Token lifetime in seconds at issue time.
    pub expires_in: i64,
    pub user: SessionUser,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.user.role == estate_core::roles::ROLE_ADMIN
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body shape returned by the API.
#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
    code: Option<String>,
    fields: Option<FieldErrors>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct StatusBody {
    status: LeadStatus,
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl HttpBackend {
    /// * `base_url` - server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>, session: Option<Session>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, session)
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        session: Option<Session>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Sign in and return the session. Does not store it; build a new
    /// backend with it.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let response = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&Credentials { email, password })
            .send()
            .await?;
        let session: Session = Self::parse(response).await?;
        tracing::info!(user_id = session.user.id, "Signed in");
        Ok(session)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token(&self) -> Result<&str, BackendError> {
        self.session
            .as_ref()
            .map(|s| s.access_token.as_str())
            .ok_or(BackendError::Unauthenticated)
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(self.token()?)
            .send()
            .await?;
        Ok(Self::parse::<Envelope<T>>(response).await?.data)
    }

    // ---- private helpers ----

    /// Decode a success body, or turn an error body into [`BackendError`].
    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| BackendError::Decode(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(ApiErrorBody {
                fields: Some(fields),
                ..
            }) => Err(BackendError::InvalidForm(fields)),
            Ok(body) => Err(BackendError::Api {
                status: status.as_u16(),
                code: body.code,
                message: body.error,
            }),
            Err(_) => Err(BackendError::Api {
                status: status.as_u16(),
                code: None,
                message: if text.is_empty() {
                    status.to_string()
                } else {
                    text
                },
            }),
        }
    }
}

#[async_trait]
impl LeadBackend for HttpBackend {
    async fn submit_lead(&self, form: &LeadForm) -> Result<Lead, BackendError> {
        let response = self
            .client
            .post(self.url("/api/v1/leads"))
            .json(form)
            .send()
            .await?;
        Ok(Self::parse::<Envelope<Lead>>(response).await?.data)
    }

    async fn list_leads(&self) -> Result<Vec<Lead>, BackendError> {
        self.get_data("/api/v1/leads").await
    }

    async fn update_status(&self, id: LeadId, status: LeadStatus) -> Result<Lead, BackendError> {
        let response = self
            .client
            .patch(self.url(&format!("/api/v1/leads/{id}/status")))
            .bearer_auth(self.token()?)
            .json(&StatusBody { status })
            .send()
            .await?;
        Ok(Self::parse::<Envelope<Lead>>(response).await?.data)
    }

    async fn share_links(&self) -> Result<ShareLinks, BackendError> {
        self.get_data("/api/v1/share").await
    }
}

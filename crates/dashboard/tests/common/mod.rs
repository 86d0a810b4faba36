#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use estate_core::lead::Lead;
use estate_core::share::ShareLinks;
use estate_core::status::LeadStatus;
use estate_core::types::LeadId;
use estate_core::validation::{validate_lead_form, LeadForm};
use estate_dashboard::{BackendError, LeadBackend};
use estate_db::{LeadStore, MemoryLeadStore};
use estate_events::EventBus;
use tokio::sync::broadcast;

/// [`LeadBackend`] straight over an in-memory store, counting list calls.
pub struct FakeBackend {
    pub store: Arc<MemoryLeadStore>,
    pub bus: Arc<EventBus>,
    list_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    failing: AtomicBool,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        let bus = Arc::new(EventBus::default());
        Arc::new(Self {
            store: Arc::new(MemoryLeadStore::new(Arc::clone(&bus))),
            bus,
            list_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        })
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Make every call fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendError::Api {
                status: 500,
                code: Some("DATABASE_ERROR".into()),
                message: "connection refused".into(),
            });
        }
        Ok(())
    }

    fn store_error(e: estate_db::StoreError) -> BackendError {
        BackendError::Api {
            status: 500,
            code: None,
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl LeadBackend for FakeBackend {
    async fn submit_lead(&self, form: &LeadForm) -> Result<Lead, BackendError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let lead = validate_lead_form(form, Utc::now().date_naive())
            .map_err(BackendError::InvalidForm)?;
        self.store.insert(lead).await.map_err(Self::store_error)
    }

    async fn list_leads(&self) -> Result<Vec<Lead>, BackendError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.store.list().await.map_err(Self::store_error)
    }

    async fn update_status(&self, id: LeadId, status: LeadStatus) -> Result<Lead, BackendError> {
        self.check()?;
        self.store
            .update_status(id, status)
            .await
            .map_err(Self::store_error)?
            .ok_or_else(|| BackendError::Api {
                status: 404,
                code: Some("NOT_FOUND".into()),
                message: format!("Entity not found: Lead with id {id}"),
            })
    }

    async fn share_links(&self) -> Result<ShareLinks, BackendError> {
        self.check()?;
        Ok(ShareLinks::new("https://waitlist.estate.test"))
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn future_date() -> String {
    "2099-06-01".to_string()
}

fn email_local_part(name: &str) -> String {
    name.split_whitespace()
        .map(|w| w.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(".")
        .to_lowercase()
}

pub fn lead_form(name: &str, budget: &str, neighborhoods: &[&str]) -> LeadForm {
    LeadForm {
        full_name: name.to_string(),
        email: format!("{}@example.com", email_local_part(name)),
        phone: "2125550100".to_string(),
        move_in_date: Some(future_date()),
        budget_range: Some(budget.to_string()),
        neighborhoods: neighborhoods.iter().map(|n| n.to_string()).collect(),
        other_neighborhood: None,
    }
}

/// Wait for the next completed reload, failing after two seconds.
pub async fn next_reload(rx: &mut broadcast::Receiver<usize>) -> usize {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("reload should happen")
        .expect("board should be alive")
}

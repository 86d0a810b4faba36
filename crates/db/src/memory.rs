//! In-process stores, used when `DATABASE_URL` is unset and by tests.
//!
//! [`MemoryLeadStore`] publishes a [`LeadChange`] on the bus for every
//! write, standing in for the PostgreSQL trigger.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use estate_core::lead::{sort_newest_first, Lead, NewLead};
use estate_core::status::LeadStatus;
use estate_core::types::{DbId, LeadId};
use estate_events::{ChangeKind, EventBus, LeadChange};
use tokio::sync::RwLock;

use crate::models::staff_user::{CreateStaffUser, StaffUser};
use crate::store::{LeadStore, StaffStore, StoreError};

pub struct MemoryLeadStore {
    /// Newest first.
    leads: RwLock<Vec<Lead>>,
    bus: Arc<EventBus>,
}

impl MemoryLeadStore {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            leads: RwLock::new(Vec::new()),
            bus,
        }
    }

    /// Pre-populate with existing records, without publishing changes.
    pub async fn seed(&self, records: impl IntoIterator<Item = Lead>) {
        let mut leads = self.leads.write().await;
        leads.extend(records);
        sort_newest_first(&mut leads);
    }

    pub async fn len(&self) -> usize {
        self.leads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.leads.read().await.is_empty()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn insert(&self, lead: NewLead) -> Result<Lead, StoreError> {
        let lead = lead.into_lead(uuid::Uuid::new_v4(), Utc::now());
        {
            let mut leads = self.leads.write().await;
            // Front insertion keeps equal timestamps newest first after the
            // stable sort.
            leads.insert(0, lead.clone());
            sort_newest_first(&mut leads);
        }
        self.bus.publish(LeadChange::new(ChangeKind::Insert, lead.id));
        Ok(lead)
    }

    async fn list(&self) -> Result<Vec<Lead>, StoreError> {
        Ok(self.leads.read().await.clone())
    }

    async fn update_status(
        &self,
        id: LeadId,
        status: LeadStatus,
    ) -> Result<Option<Lead>, StoreError> {
        let updated = {
            let mut leads = self.leads.write().await;
            leads.iter_mut().find(|l| l.id == id).map(|lead| {
                lead.status = status;
                lead.clone()
            })
        };
        if updated.is_some() {
            self.bus.publish(LeadChange::new(ChangeKind::Update, id));
        }
        Ok(updated)
    }

    async fn health(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStaffStore {
    users: RwLock<Vec<StaffUser>>,
    next_id: AtomicI64,
}

impl MemoryStaffStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StaffStore for MemoryStaffStore {
    async fn create(&self, input: CreateStaffUser) -> Result<StaffUser, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&input.email)) {
            return Err(StoreError::Conflict(
                "An account with this email already exists".into(),
            ));
        }
        let user = StaffUser {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<StaffUser>, StoreError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StaffUser>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

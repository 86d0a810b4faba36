//! Store traits and their PostgreSQL implementations.

use async_trait::async_trait;
use estate_core::lead::{sort_newest_first, Lead, NewLead};
use estate_core::status::LeadStatus;
use estate_core::types::{DbId, LeadId};

use crate::models::staff_user::{CreateStaffUser, StaffUser};
use crate::repositories::{LeadRepo, StaffUserRepo};
use crate::DbPool;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row does not describe a valid entity.
    #[error("Malformed row {id}: {reason}")]
    MalformedRow { id: String, reason: String },

    /// A unique constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    /// Map a unique violation to [`StoreError::Conflict`], everything else
    /// to [`StoreError::Database`].
    fn from_insert(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict(format!("{what} already exists"))
            }
            _ => Self::Database(err),
        }
    }
}

/// The lead data store: insert one, list all newest first, update status.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Persist a validated submission. The store assigns `id`,
    /// `created_at` and the `new` status.
    async fn insert(&self, lead: NewLead) -> Result<Lead, StoreError>;

    /// Every lead, ordered by `created_at` descending.
    async fn list(&self) -> Result<Vec<Lead>, StoreError>;

    /// Set one lead's status. `Ok(None)` when the id is unknown.
    async fn update_status(
        &self,
        id: LeadId,
        status: LeadStatus,
    ) -> Result<Option<Lead>, StoreError>;

    /// Whether the backing storage is reachable.
    async fn health(&self) -> Result<(), StoreError>;
}

/// Staff accounts for dashboard sign-in.
#[async_trait]
pub trait StaffStore: Send + Sync {
    /// Create an account. [`StoreError::Conflict`] if the email is taken
    /// (compared case-insensitively).
    async fn create(&self, input: CreateStaffUser) -> Result<StaffUser, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<StaffUser>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<StaffUser>, StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`LeadStore`] over the `leads` table.
///
/// Change notifications come from the table trigger, see
/// [`crate::listener`].
#[derive(Clone)]
pub struct PgLeadStore {
    pool: DbPool,
}

impl PgLeadStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn insert(&self, lead: NewLead) -> Result<Lead, StoreError> {
        let row = LeadRepo::create(&self.pool, uuid::Uuid::new_v4(), &lead).await?;
        Lead::try_from(row)
    }

    async fn list(&self) -> Result<Vec<Lead>, StoreError> {
        let mut leads = LeadRepo::list(&self.pool)
            .await?
            .into_iter()
            .map(Lead::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        // The query already orders; keep the invariant independent of SQL.
        sort_newest_first(&mut leads);
        Ok(leads)
    }

    async fn update_status(
        &self,
        id: LeadId,
        status: LeadStatus,
    ) -> Result<Option<Lead>, StoreError> {
        LeadRepo::update_status(&self.pool, id, status)
            .await?
            .map(Lead::try_from)
            .transpose()
    }

    async fn health(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

/// [`StaffStore`] over the `staff_users` table.
#[derive(Clone)]
pub struct PgStaffStore {
    pool: DbPool,
}

impl PgStaffStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffStore for PgStaffStore {
    async fn create(&self, input: CreateStaffUser) -> Result<StaffUser, StoreError> {
        StaffUserRepo::create(&self.pool, &input)
            .await
            .map_err(|e| StoreError::from_insert(e, "An account with this email"))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<StaffUser>, StoreError> {
        Ok(StaffUserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StaffUser>, StoreError> {
        Ok(StaffUserRepo::find_by_email(&self.pool, email).await?)
    }
}

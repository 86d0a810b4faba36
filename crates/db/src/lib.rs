//! Persistence for leads and staff accounts.
//!
//! The [`store`] traits are what the rest of the workspace programs
//! against. [`store::PgLeadStore`] / [`store::PgStaffStore`] back them with
//! PostgreSQL through the [`repositories`]; [`memory`] provides in-process
//! implementations used when no database is configured and in tests.

use sqlx::postgres::PgPoolOptions;

pub mod listener;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use memory::{MemoryLeadStore, MemoryStaffStore};
pub use store::{LeadStore, PgLeadStore, PgStaffStore, StaffStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

//! Repository for the `staff_users` table.

use estate_core::types::DbId;
use sqlx::PgPool;

use crate::models::staff_user::{CreateStaffUser, StaffUser};

const COLUMNS: &str = "id, email, password_hash, role, created_at";

pub struct StaffUserRepo;

impl StaffUserRepo {
    /// Insert a new staff account, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStaffUser) -> Result<StaffUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff_users (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StaffUser>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StaffUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_users WHERE id = $1");
        sqlx::query_as::<_, StaffUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by email (case-insensitive, matching the unique index).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<StaffUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, StaffUser>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}

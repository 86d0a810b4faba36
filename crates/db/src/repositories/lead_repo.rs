//! Repository for the `leads` table.

use estate_core::lead::NewLead;
use estate_core::status::LeadStatus;
use estate_core::types::LeadId;
use sqlx::PgPool;

use crate::models::lead::LeadRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, phone, move_in_date, budget_range, \
                       neighborhoods, status, created_at";

/// Insert, list and status update for leads. There is no delete.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a lead with status `new`; the database assigns `created_at`.
    pub async fn create(pool: &PgPool, id: LeadId, input: &NewLead) -> Result<LeadRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (id, full_name, email, phone, move_in_date, budget_range, neighborhoods, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.move_in_date)
            .bind(input.budget_range.as_str())
            .bind(&input.neighborhoods)
            .bind(LeadStatus::New.as_str())
            .fetch_one(pool)
            .await
    }

    /// All leads, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<LeadRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads ORDER BY created_at DESC");
        sqlx::query_as::<_, LeadRow>(&query).fetch_all(pool).await
    }

    /// Set the status of one lead.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: LeadId,
        status: LeadStatus,
    ) -> Result<Option<LeadRow>, sqlx::Error> {
        let query = format!("UPDATE leads SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }
}

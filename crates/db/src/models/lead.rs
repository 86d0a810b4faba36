//! Lead row as stored in the `leads` table.

use chrono::NaiveDate;
use estate_core::budget::BudgetRange;
use estate_core::lead::Lead;
use estate_core::status::LeadStatus;
use estate_core::types::{LeadId, Timestamp};
use sqlx::FromRow;

use crate::store::StoreError;

/// Raw `leads` row. Enum columns are plain text here and only become typed
/// in the conversion to [`Lead`], which rejects anything malformed.
#[derive(Debug, Clone, FromRow)]
pub struct LeadRow {
    pub id: LeadId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub move_in_date: NaiveDate,
    pub budget_range: String,
    pub neighborhoods: Vec<String>,
    pub status: String,
    pub created_at: Timestamp,
}

impl TryFrom<LeadRow> for Lead {
    type Error = StoreError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        let malformed = |reason: String| StoreError::MalformedRow {
            id: row.id.to_string(),
            reason,
        };

        let budget_range = row
            .budget_range
            .parse::<BudgetRange>()
            .map_err(|e| malformed(e.to_string()))?;
        let status = row
            .status
            .parse::<LeadStatus>()
            .map_err(|e| malformed(e.to_string()))?;
        if row.neighborhoods.is_empty() {
            return Err(malformed("no neighborhoods".into()));
        }

        Ok(Lead {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            move_in_date: row.move_in_date,
            budget_range,
            neighborhoods: row.neighborhoods,
            status,
            created_at: row.created_at,
        })
    }
}

//! The lead record and its creation payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::budget::BudgetRange;
use crate::status::LeadStatus;
use crate::types::{LeadId, Timestamp};

/// One persisted waitlist submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub move_in_date: NaiveDate,
    pub budget_range: BudgetRange,
    /// Never empty. May hold a free-text "other" label.
    pub neighborhoods: Vec<String>,
    pub status: LeadStatus,
    pub created_at: Timestamp,
}

/// A validated submission ready to be inserted.
///
/// Produced only by [`crate::validation::validate_lead_form`]. The store
/// assigns `id`, `created_at` and the initial `new` status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLead {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub move_in_date: NaiveDate,
    pub budget_range: BudgetRange,
    pub neighborhoods: Vec<String>,
}

impl NewLead {
    /// Materialise the record a store writes for this submission.
    pub fn into_lead(self, id: LeadId, created_at: Timestamp) -> Lead {
        Lead {
            id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            move_in_date: self.move_in_date,
            budget_range: self.budget_range,
            neighborhoods: self.neighborhoods,
            status: LeadStatus::New,
            created_at,
        }
    }
}

/// Sort leads newest first, the canonical display order.
///
/// Stable, so leads sharing a `created_at` keep their relative order.
pub fn sort_newest_first(leads: &mut [Lead]) {
    leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn new_lead() -> NewLead {
        NewLead {
            full_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "2125550100".into(),
            move_in_date: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
            budget_range: BudgetRange::From3kTo5k,
            neighborhoods: vec!["SoHo".into()],
        }
    }

    #[test]
    fn into_lead_forces_new_status() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let lead = new_lead().into_lead(uuid::Uuid::new_v4(), at);
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.created_at, at);
        assert_eq!(lead.neighborhoods, vec!["SoHo".to_string()]);
    }

    #[test]
    fn sorts_newest_first() {
        let older = new_lead().into_lead(
            uuid::Uuid::new_v4(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        );
        let newer = new_lead().into_lead(
            uuid::Uuid::new_v4(),
            Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
        );
        let mut leads = vec![older.clone(), newer.clone()];
        sort_newest_first(&mut leads);
        assert_eq!(leads[0].id, newer.id);
        assert_eq!(leads[1].id, older.id);
    }
}

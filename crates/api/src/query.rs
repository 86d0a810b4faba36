//! Shared query parameter types for API handlers.

use estate_core::error::CoreError;
use estate_core::filter::BudgetFilter;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `?budget=<all|2k-3k|3k-5k|5k+>`; absent means `all`.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetParams {
    pub budget: Option<String>,
}

impl BudgetParams {
    pub fn filter(&self) -> AppResult<BudgetFilter> {
        match self.budget.as_deref() {
            None | Some("") => Ok(BudgetFilter::All),
            Some(raw) => raw.parse().map_err(|_| {
                AppError::Core(CoreError::Validation(format!(
                    "Unknown budget filter '{raw}'"
                )))
            }),
        }
    }
}

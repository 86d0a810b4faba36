//! Budget filter applied to the cached lead list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::budget::{BudgetRange, UnknownBudgetRange};
use crate::lead::Lead;

/// Either every lead or only those in one bracket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BudgetFilter {
    #[default]
    All,
    Only(BudgetRange),
}

impl BudgetFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(budget) => budget.as_str(),
        }
    }

    pub fn matches(self, lead: &Lead) -> bool {
        match self {
            Self::All => true,
            Self::Only(budget) => lead.budget_range == budget,
        }
    }

    /// Leads passing the filter, in their existing order.
    pub fn apply<'a>(self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        leads.iter().filter(|l| self.matches(l)).collect()
    }
}

impl fmt::Display for BudgetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetFilter {
    type Err = UnknownBudgetRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl Serialize for BudgetFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BudgetFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

//! Budget brackets a lead can choose from.
//!
//! The wire value (`"2k-3k"`, ...) is what the store persists and what the
//! budget filter matches on. The labels are presentation only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three fixed monthly budget brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "2k-3k")]
    From2kTo3k,
    #[serde(rename = "3k-5k")]
    From3kTo5k,
    #[serde(rename = "5k+")]
    Over5k,
}

impl BudgetRange {
    /// Every bracket, in the order the form lists them.
    pub const ALL: [BudgetRange; 3] = [Self::From2kTo3k, Self::From3kTo5k, Self::Over5k];

    /// The persisted wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::From2kTo3k => "2k-3k",
            Self::From3kTo5k => "3k-5k",
            Self::Over5k => "5k+",
        }
    }

    /// Compact label used by the leads table and the CSV export.
    pub fn short_label(self) -> &'static str {
        match self {
            Self::From2kTo3k => "$2k-$3k",
            Self::From3kTo5k => "$3k-$5k",
            Self::Over5k => "$5k+",
        }
    }

    /// Long label shown in the intake form's select.
    pub fn form_label(self) -> &'static str {
        match self {
            Self::From2kTo3k => "$2,000 - $3,000",
            Self::From3kTo5k => "$3,000 - $5,000",
            Self::Over5k => "$5,000+",
        }
    }

    /// Reverse of [`short_label`](Self::short_label).
    pub fn from_short_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.short_label() == label)
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown budget range '{0}'")]
pub struct UnknownBudgetRange(pub String);

impl FromStr for BudgetRange {
    type Err = UnknownBudgetRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| UnknownBudgetRange(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_values() {
        assert_eq!("2k-3k".parse::<BudgetRange>(), Ok(BudgetRange::From2kTo3k));
        assert_eq!("3k-5k".parse::<BudgetRange>(), Ok(BudgetRange::From3kTo5k));
        assert_eq!("5k+".parse::<BudgetRange>(), Ok(BudgetRange::Over5k));
    }

    #[test]
    fn rejects_labels_and_unknown_values() {
        assert!("$5k+".parse::<BudgetRange>().is_err());
        assert!("10k+".parse::<BudgetRange>().is_err());
        assert!("".parse::<BudgetRange>().is_err());
    }

    #[test]
    fn short_label_round_trips() {
        for budget in BudgetRange::ALL {
            assert_eq!(BudgetRange::from_short_label(budget.short_label()), Some(budget));
        }
        assert_eq!(BudgetRange::From3kTo5k.short_label(), "$3k-$5k");
    }

    #[test]
    fn serde_uses_wire_value() {
        let json = serde_json::to_string(&BudgetRange::Over5k).unwrap();
        assert_eq!(json, "\"5k+\"");
        let parsed: BudgetRange = serde_json::from_str("\"2k-3k\"").unwrap();
        assert_eq!(parsed, BudgetRange::From2kTo3k);
    }
}

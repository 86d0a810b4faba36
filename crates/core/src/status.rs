//! Lead status lifecycle.
//!
//! A flat tag, not a guarded state machine: staff may move a lead from any
//! status to any other, including back to `new`. No business rule restricts
//! the transitions today, so none is encoded here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Archived,
}

/// Badge colour family the dashboard renders a status with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Emerald,
    Blue,
    Gray,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 3] = [Self::New, Self::Contacted, Self::Archived];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Archived => "archived",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Archived => "Archived",
        }
    }

    pub fn tone(self) -> BadgeTone {
        match self {
            Self::New => BadgeTone::Emerald,
            Self::Contacted => BadgeTone::Blue,
            Self::Archived => BadgeTone::Gray,
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lead status '{0}'")]
pub struct UnknownLeadStatus(pub String);

impl FromStr for LeadStatus {
    type Err = UnknownLeadStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownLeadStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_new() {
        assert_eq!(LeadStatus::default(), LeadStatus::New);
    }

    #[test]
    fn labels_and_tones() {
        assert_eq!(LeadStatus::New.label(), "New");
        assert_eq!(LeadStatus::Contacted.tone(), BadgeTone::Blue);
        assert_eq!(LeadStatus::Archived.tone(), BadgeTone::Gray);
    }

    #[test]
    fn parse_round_trip() {
        for status in LeadStatus::ALL {
            assert_eq!(status.as_str().parse::<LeadStatus>(), Ok(status));
        }
        assert!("closed".parse::<LeadStatus>().is_err());
    }
}

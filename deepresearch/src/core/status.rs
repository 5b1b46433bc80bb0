//! Stage status with the fixed progression order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The status of a pipeline run, named after the stage that runs next.
///
/// Statuses only ever advance through the fixed order
/// `Research < Draft < FactCheck < Citation < Improve < Complete`, or jump
/// to [`StageStatus::Error`]; they never regress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// The research stage is next.
    Research,
    /// The drafting stage is next.
    Draft,
    /// The fact-checking stage is next.
    FactCheck,
    /// The citation stage is next.
    Citation,
    /// The improvement stage is next.
    Improve,
    /// The run finished with a final answer.
    Complete,
    /// The run terminated with an error.
    Error,
}

impl StageStatus {
    /// Position of this status in the fixed progression order, or `None`
    /// for [`StageStatus::Error`], which sits outside the order.
    #[must_use]
    pub fn sequence_index(self) -> Option<u8> {
        match self {
            Self::Research => Some(0),
            Self::Draft => Some(1),
            Self::FactCheck => Some(2),
            Self::Citation => Some(3),
            Self::Improve => Some(4),
            Self::Complete => Some(5),
            Self::Error => None,
        }
    }

    /// Whether the run stops at this status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }

    /// Whether this status marks a failed run.
    #[must_use]
    pub fn is_error(self) -> bool {
        self == Self::Error
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Research => "research",
            Self::Draft => "draft",
            Self::FactCheck => "fact_check",
            Self::Citation => "citation",
            Self::Improve => "improve",
            Self::Complete => "complete",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_order() {
        let order = [
            StageStatus::Research,
            StageStatus::Draft,
            StageStatus::FactCheck,
            StageStatus::Citation,
            StageStatus::Improve,
            StageStatus::Complete,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].sequence_index() < pair[1].sequence_index());
        }
        assert_eq!(StageStatus::Error.sequence_index(), None);
    }

    #[test]
    fn test_terminal() {
        assert!(StageStatus::Complete.is_terminal());
        assert!(StageStatus::Error.is_terminal());
        assert!(!StageStatus::Citation.is_terminal());
    }

    #[test]
    fn test_serde_rendering() {
        let json = serde_json::to_string(&StageStatus::FactCheck).unwrap();
        assert_eq!(json, "\"fact_check\"");

        let parsed: StageStatus = serde_json::from_str("\"complete\"").unwrap();
        assert_eq!(parsed, StageStatus::Complete);
    }

    #[test]
    fn test_display_matches_serde() {
        for status in [
            StageStatus::Research,
            StageStatus::FactCheck,
            StageStatus::Error,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}

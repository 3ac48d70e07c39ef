//! Non-fatal issues collected while assembling a race
//!
//! Every issue is logged through `tracing` when it is recorded and kept so the
//! caller can inspect what was skipped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recoverable problem found during assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// A split was requested with no destination fractional
    MissingSplitTarget { from: Option<String> },
    /// No point of call sits at the fractional's distance
    UnmatchedPointOfCall { horse: String, feet: i32 },
    /// Neither lengths ahead nor total lengths behind were known
    UnknownLengths { horse: String, point: String },
    /// The race fractional had no time to estimate from
    MissingFractionalTime { point: String },
    /// The track condition code was not recognised
    UnknownTrackCondition { code: String },
    /// The race type has no short code
    UnknownRaceType { race_type: String },
    /// A win/place/show payoff did not match any starter
    UnmatchedPayoff {
        program: Option<String>,
        horse: Option<String>,
    },
    /// A disqualification did not match any starter
    UnmatchedDisqualification {
        program: Option<String>,
        horse: Option<String>,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingSplitTarget { from } => write!(
                f,
                "Unable to calculate split from {} without a destination fractional",
                from.as_deref().unwrap_or("Start")
            ),
            Issue::UnmatchedPointOfCall { horse, feet } => write!(
                f,
                "No point of call at {} feet for {}",
                feet, horse
            ),
            Issue::UnknownLengths { horse, point } => {
                write!(f, "Lengths behind unknown for {} at {}", horse, point)
            }
            Issue::MissingFractionalTime { point } => {
                write!(f, "Race fractional {} has no time", point)
            }
            Issue::UnknownTrackCondition { code } => {
                write!(f, "Unknown track condition code: {}", code)
            }
            Issue::UnknownRaceType { race_type } => {
                write!(f, "No code for race type {}, omitted from summary", race_type)
            }
            Issue::UnmatchedPayoff { program, horse } => write!(
                f,
                "No starter matched payoff for program {} ({})",
                program.as_deref().unwrap_or("-"),
                horse.as_deref().unwrap_or("-")
            ),
            Issue::UnmatchedDisqualification { program, horse } => write!(
                f,
                "No starter matched disqualification for program {} ({})",
                program.as_deref().unwrap_or("-"),
                horse.as_deref().unwrap_or("-")
            ),
        }
    }
}

/// Issues recorded for a single race, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    issues: Vec<Issue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue and emit it as a warning
    pub fn record(&mut self, issue: Issue) {
        tracing::warn!("{}", issue);
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.record(Issue::MissingFractionalTime {
            point: "1/4".to_string(),
        });
        diagnostics.record(Issue::UnknownTrackCondition {
            code: "ZZ".to_string(),
        });

        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(
            diagnostics.issues()[1],
            Issue::UnknownTrackCondition { .. }
        ));
    }

    #[test]
    fn test_issue_display() {
        let issue = Issue::UnmatchedPayoff {
            program: None,
            horse: Some("Tiznow".to_string()),
        };
        assert!(issue.to_string().contains("Tiznow"));

        let issue = Issue::MissingSplitTarget { from: None };
        assert!(issue.to_string().contains("Start"));
    }
}

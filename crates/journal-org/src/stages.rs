//! Workflow stages
//!
//! A submission moves through a fixed pipeline of editorial stages.
//! Stage-scoped authorization checks membership for one specific
//! stage of one specific submission.

use serde::{Deserialize, Serialize};

/// A phase of the submission pipeline.
///
/// # Examples
///
/// ```
/// use journal_org::WorkflowStage;
///
/// assert_eq!(WorkflowStage::parse("review"), Some(WorkflowStage::Review));
/// assert_eq!(WorkflowStage::Production.as_str(), "production");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    /// Initial submission intake
    Submission,

    /// Peer review
    Review,

    /// Copyediting after acceptance
    Copyediting,

    /// Layout and galley production
    Production,
}

impl WorkflowStage {
    /// Parse a workflow stage from its string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(WorkflowStage)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "submission" => Some(Self::Submission),
            "review" => Some(Self::Review),
            "copyediting" => Some(Self::Copyediting),
            "production" => Some(Self::Production),
            _ => None,
        }
    }

    /// Get string representation of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submission => "submission",
            Self::Review => "review",
            Self::Copyediting => "copyediting",
            Self::Production => "production",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_parse() {
        assert_eq!(WorkflowStage::parse("review"), Some(WorkflowStage::Review));
        assert_eq!(
            WorkflowStage::parse("PRODUCTION"),
            Some(WorkflowStage::Production)
        );
        assert_eq!(WorkflowStage::parse("unknown"), None);
    }

    #[test]
    fn test_stage_round_trip() {
        for stage in [
            WorkflowStage::Submission,
            WorkflowStage::Review,
            WorkflowStage::Copyediting,
            WorkflowStage::Production,
        ] {
            assert_eq!(WorkflowStage::parse(stage.as_str()), Some(stage));
        }
    }
}

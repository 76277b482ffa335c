//! Per-cycle outcome types
//!
//! Each daily cycle produces exactly one `CycleOutcome`, created fresh and
//! discarded after the report has gone out. Stage failures are data, not
//! exceptions: the scheduler inspects the tag to decide what to notify and
//! always re-arms for the next day.

use std::fmt;

/// The pipeline stage a failure occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Remote SFTP fetch of the dated extract
    Fetch,
    /// Validation and reshaping of the extract rows
    Transform,
    /// Submission to the integration endpoint
    Invoke,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetch => write!(f, "fetch"),
            Stage::Transform => write!(f, "transform"),
            Stage::Invoke => write!(f, "invoke"),
        }
    }
}

/// Structured fields reported by the integration endpoint
///
/// Transient: used only to compose the success notification. The relay passes
/// the business status and error message through verbatim and never interprets
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointResult {
    /// Status code returned by the conversion call
    pub status: i32,

    /// Remote log file reference
    pub log_file: String,

    /// Remote exception file reference
    pub exception_file: String,

    /// Remote success file reference
    pub success_file: String,

    /// Queue identifier of the accepted submission
    pub queue_id: String,

    /// Error message reported by the endpoint, if any
    pub error_message: String,
}

/// Outcome of one full Fetch → Transform → Invoke cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// All stages ran; carries the endpoint's reported fields
    Completed {
        /// Endpoint result, absent when the cycle ran in dry-run mode
        result: Option<EndpointResult>,
    },

    /// A stage failed and the remaining stages were short-circuited
    Failed {
        /// The stage that failed
        stage: Stage,
        /// Full diagnostic detail, as sent to operators
        detail: String,
    },
}

impl CycleOutcome {
    /// Shorthand for building a failed outcome
    pub fn failed(stage: Stage, detail: impl Into<String>) -> Self {
        CycleOutcome::Failed {
            stage,
            detail: detail.into(),
        }
    }

    /// Whether the cycle completed all stages
    pub fn is_completed(&self) -> bool {
        matches!(self, CycleOutcome::Completed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Fetch.to_string(), "fetch");
        assert_eq!(Stage::Transform.to_string(), "transform");
        assert_eq!(Stage::Invoke.to_string(), "invoke");
    }

    #[test]
    fn test_failed_shorthand() {
        let outcome = CycleOutcome::failed(Stage::Fetch, "no file");
        assert!(!outcome.is_completed());
        match outcome {
            CycleOutcome::Failed { stage, detail } => {
                assert_eq!(stage, Stage::Fetch);
                assert_eq!(detail, "no file");
            }
            _ => panic!("expected Failed"),
        }
    }

    #[test]
    fn test_completed_outcome() {
        let outcome = CycleOutcome::Completed {
            result: Some(EndpointResult {
                status: 0,
                queue_id: "Q-1".to_string(),
                ..Default::default()
            }),
        };
        assert!(outcome.is_completed());
    }
}

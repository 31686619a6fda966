//! Per-stage outcomes for the pipeline's error isolation.
//!
//! Every pipeline stage is wrapped independently: a failure is caught and
//! logged, and the run continues. Downstream stages inspect their
//! upstream's outcome and short-circuit to `Skipped` instead of computing
//! on absent data.

/// Result of running one pipeline stage.
#[derive(Debug)]
pub enum StageOutcome<T> {
    /// Stage ran to completion and produced its output.
    Completed(T),
    /// Stage ran and failed; the reason goes into the transcript.
    Failed {
        /// Human-readable failure description.
        reason: String,
    },
    /// Stage never ran because an upstream stage did not complete.
    Skipped {
        /// Name of the upstream stage that blocked this one.
        upstream: &'static str,
    },
}

impl<T> StageOutcome<T> {
    /// Wrap a `Result` into an outcome.
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Completed(value),
            Err(err) => Self::Failed {
                reason: err.to_string(),
            },
        }
    }

    /// The stage's output, if it completed.
    pub const fn completed(&self) -> Option<&T> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the stage completed.
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// One transcript line describing this outcome.
    pub fn status_line(&self) -> String {
        match self {
            Self::Completed(_) => "completed".to_string(),
            Self::Failed { reason } => format!("failed: {reason}"),
            Self::Skipped { upstream } => format!("skipped: upstream stage '{upstream}' did not complete"),
        }
    }
}

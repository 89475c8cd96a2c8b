//! Error types for session workers.
//!
//! The registry itself has no error type: a query against a missing session
//! is an expected race and surfaces as `false`/`None`, never as a fault.
//! Errors exist only on the worker side of the contract.

use crate::outcome::SessionOutcome;
use thiserror::Error;

/// Why a worker body did not run to completion.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The worker observed its stop latch and exited cooperatively.
    #[error("worker stopped: {}", .reason.as_deref().unwrap_or("stop requested"))]
    Stopped {
        /// The reason recorded on the latch, if any.
        reason: Option<String>,
    },

    /// The worker body failed.
    #[error("worker failed: {0}")]
    Failed(String),

    /// The worker body panicked; caught at the launcher boundary.
    #[error("worker panicked: {0}")]
    Panicked(String),
}

impl WorkerError {
    /// Classifies a worker result into a terminal [`SessionOutcome`].
    #[must_use]
    pub fn classify(result: &Result<(), WorkerError>) -> SessionOutcome {
        match result {
            Ok(()) => SessionOutcome::Completed,
            Err(WorkerError::Stopped { .. }) => SessionOutcome::Cancelled,
            Err(_) => SessionOutcome::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_results() {
        assert_eq!(WorkerError::classify(&Ok(())), SessionOutcome::Completed);
        assert_eq!(
            WorkerError::classify(&Err(WorkerError::Stopped { reason: None })),
            SessionOutcome::Cancelled
        );
        assert_eq!(
            WorkerError::classify(&Err(WorkerError::Failed("boom".into()))),
            SessionOutcome::Failed
        );
        assert_eq!(
            WorkerError::classify(&Err(WorkerError::Panicked("boom".into()))),
            SessionOutcome::Failed
        );
    }

    #[test]
    fn test_stopped_display() {
        let err = WorkerError::Stopped {
            reason: Some("user hit stop".into()),
        };
        assert_eq!(err.to_string(), "worker stopped: user hit stop");

        let bare = WorkerError::Stopped { reason: None };
        assert_eq!(bare.to_string(), "worker stopped: stop requested");
    }
}

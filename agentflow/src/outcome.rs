//! Terminal outcome of a session run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a session run ended.
///
/// A cooperatively stopped worker reports [`SessionOutcome::Cancelled`],
/// distinct from both success and failure, so callers can tell a stop
/// request that landed from a worker that broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The worker ran to completion.
    Completed,
    /// The worker observed its stop latch and exited cleanly.
    Cancelled,
    /// The worker failed or panicked.
    Failed,
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl SessionOutcome {
    /// Returns true if the worker ran to completion.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns true if the worker exited in response to a stop request.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(SessionOutcome::Completed.to_string(), "completed");
        assert_eq!(SessionOutcome::Cancelled.to_string(), "cancelled");
        assert_eq!(SessionOutcome::Failed.to_string(), "failed");
    }

    #[test]
    fn test_outcome_predicates() {
        assert!(SessionOutcome::Completed.is_success());
        assert!(!SessionOutcome::Cancelled.is_success());
        assert!(SessionOutcome::Cancelled.is_cancelled());
        assert!(!SessionOutcome::Failed.is_cancelled());
    }

    #[test]
    fn test_outcome_serialize() {
        let json = serde_json::to_string(&SessionOutcome::Cancelled).unwrap();
        assert_eq!(json, r#""cancelled""#);

        let back: SessionOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SessionOutcome::Cancelled);
    }
}

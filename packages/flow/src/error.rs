//! Failure types for the auth flow.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::ValidationErrors;

/// Why an account operation did not succeed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// The service answered but refused: wrong credentials, falsy session.
    Rejected,
    /// The account already exists. Retrying the same form cannot succeed.
    Conflict,
    /// The service could not be reached or failed internally.
    Unavailable,
    /// The user aborted the submission.
    Cancelled,
    /// The submission ran past the configured timeout.
    TimedOut,
}

impl FailureKind {
    /// Whether resubmitting the same form can succeed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FailureKind::Conflict)
    }
}

/// Error reported by an [`crate::AccountService`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Rejected, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Conflict, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unavailable, message)
    }
}

/// A failed submission as surfaced to the user.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OperationFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl OperationFailure {
    pub fn is_recoverable(&self) -> bool {
        self.kind.is_recoverable()
    }

    pub(crate) fn cancelled() -> Self {
        Self {
            kind: FailureKind::Cancelled,
            message: "Submission cancelled".to_string(),
        }
    }

    pub(crate) fn timed_out() -> Self {
        Self {
            kind: FailureKind::TimedOut,
            message: "The request took too long. Please try again.".to_string(),
        }
    }
}

impl From<ServiceError> for OperationFailure {
    fn from(e: ServiceError) -> Self {
        Self {
            kind: e.kind,
            message: e.message,
        }
    }
}

/// A submission refused before any account operation ran.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("invalid form: {0}")]
    Validation(ValidationErrors),

    #[error("a submission is already in flight")]
    Busy,

    #[error("the form is closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_conflict_is_unrecoverable() {
        assert!(!FailureKind::Conflict.is_recoverable());
        for kind in [
            FailureKind::Rejected,
            FailureKind::Unavailable,
            FailureKind::Cancelled,
            FailureKind::TimedOut,
        ] {
            assert!(kind.is_recoverable(), "{kind:?}");
        }
    }

    #[test]
    fn test_service_error_converts_to_failure() {
        let failure = OperationFailure::from(ServiceError::conflict("Email already exists"));
        assert_eq!(failure.kind, FailureKind::Conflict);
        assert_eq!(failure.to_string(), "Email already exists");
        assert!(!failure.is_recoverable());
    }
}

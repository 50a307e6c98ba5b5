//! Domain-level error types.

use thiserror::Error;

use crate::domain::RequestStatus;

/// Domain errors - client-side rule failures surfaced before any network call.
///
/// `Display` is the exact inline message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("No email found. Please register again.")]
    MissingPendingEmail,

    #[error("No reset request found. Please request a new OTP.")]
    MissingResetEmail,

    #[error("Only submitted requests can be updated (current status: {status})")]
    NotEditable { status: RequestStatus },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

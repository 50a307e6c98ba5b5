//! Backend API ports - one trait per screen family.

use async_trait::async_trait;

use crate::domain::{PickupRequest, Profile, ProfileUpdate, RequestSubmission, Session};

/// Message shown when the backend cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str =
    "Cannot reach the server. Please start the backend and try again.";

/// Errors from the backend API.
///
/// `Display` is the inline text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable,

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// The request could not be built on this side.
    #[error("{0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }
}

/// Outcome of a call that may hand out a session token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthGrant {
    pub message: Option<String>,
    pub token: Option<String>,
}

/// Registration form as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Decoded proof image of a request.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for RequestImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestImage")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Account endpoints under `/auth`.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, ApiError>;

    /// Starts registration; the backend emails an OTP.
    async fn register(&self, registration: &Registration) -> Result<Option<String>, ApiError>;

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthGrant, ApiError>;

    async fn request_login_otp(&self, email: &str) -> Result<Option<String>, ApiError>;

    async fn verify_login_otp(&self, email: &str, otp: &str) -> Result<AuthGrant, ApiError>;

    async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError>;

    async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<Option<String>, ApiError>;

    async fn change_password(
        &self,
        session: &Session,
        change: &PasswordChange,
    ) -> Result<Option<String>, ApiError>;
}

/// Profile endpoints under `/profile`.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch_profile(&self, session: &Session) -> Result<Profile, ApiError>;

    async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<Option<String>, ApiError>;
}

/// Pickup request endpoints under `/requests`.
#[async_trait]
pub trait PickupRequestApi: Send + Sync {
    async fn submit(
        &self,
        session: &Session,
        submission: &RequestSubmission,
    ) -> Result<PickupRequest, ApiError>;

    async fn list_mine(&self, session: &Session) -> Result<Vec<PickupRequest>, ApiError>;

    async fn get(&self, session: &Session, id: i64) -> Result<PickupRequest, ApiError>;

    async fn update(
        &self,
        session: &Session,
        id: i64,
        submission: &RequestSubmission,
    ) -> Result<PickupRequest, ApiError>;

    async fn delete(&self, session: &Session, id: i64) -> Result<Option<String>, ApiError>;

    /// `None` when the backend has no image data for the request.
    async fn image(&self, session: &Session, id: i64) -> Result<Option<RequestImage>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_user_message() {
        let err = ApiError::Server {
            status: 401,
            message: "Invalid email or password".into(),
        };
        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(err.is_unauthorized());
        assert_eq!(ApiError::Unreachable.to_string(), UNREACHABLE_MESSAGE);
    }
}

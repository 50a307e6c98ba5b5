//! Session token inspection port.

/// Claims readable from a stored session token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenClaims {
    /// Usually the account email.
    pub subject: Option<String>,
    /// Expiry as a unix timestamp, if the token carries one.
    pub expires_at: Option<i64>,
}

impl TokenClaims {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

/// Reads claims out of a session token without verifying it.
///
/// The backend holds the signing key; the client only uses the claims to
/// avoid sending a token it already knows has expired.
pub trait TokenInspector: Send + Sync {
    fn inspect(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Session guard errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please login to continue.")]
    MissingAuth,

    #[error("Session expired. Please login again.")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

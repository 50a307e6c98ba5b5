use std::fmt;

use serde::{Serialize, Serializer};

/// Screens of the client and where each flow lands next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    VerifyOtp,
    ForgotPassword,
    ResetPassword,
    Dashboard,
    Profile,
    SubmitRequest,
    ViewRequests,
    TrackRequest(i64),
}

impl Route {
    /// Resolve a path the way the routing table does: `/requests` lands on the
    /// list and anything unknown falls back to the landing page.
    pub fn resolve(path: &str) -> Self {
        let path = path.trim().trim_end_matches('/');
        match path {
            "" => Self::Landing,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/verify-otp" => Self::VerifyOtp,
            "/forgot-password" => Self::ForgotPassword,
            "/reset-password" => Self::ResetPassword,
            "/dashboard" => Self::Dashboard,
            "/profile" | "/profile/me" => Self::Profile,
            "/requests" | "/requests/view" => Self::ViewRequests,
            "/requests/submit" => Self::SubmitRequest,
            other => other
                .strip_prefix("/requests/track/")
                .and_then(|id| id.parse().ok())
                .map(Self::TrackRequest)
                .unwrap_or(Self::Landing),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::VerifyOtp => "/verify-otp".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::ResetPassword => "/reset-password".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::SubmitRequest => "/requests/submit".to_string(),
            Self::ViewRequests => "/requests/view".to_string(),
            Self::TrackRequest(id) => format!("/requests/track/{id}"),
        }
    }

    /// Routes behind the session guard.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Dashboard
                | Self::Profile
                | Self::SubmitRequest
                | Self::ViewRequests
                | Self::TrackRequest(_)
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_redirects() {
        assert_eq!(Route::resolve("/requests"), Route::ViewRequests);
        assert_eq!(Route::resolve("/requests/track/42"), Route::TrackRequest(42));
        assert_eq!(Route::resolve("/requests/track/abc"), Route::Landing);
        assert_eq!(Route::resolve("/nowhere"), Route::Landing);
        assert_eq!(Route::resolve("/"), Route::Landing);
    }

    #[test]
    fn test_protected_routes() {
        assert!(Route::Dashboard.is_protected());
        assert!(Route::TrackRequest(1).is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::VerifyOtp.is_protected());
    }
}

//! Application-level errors. `Display` is the inline message shown to the user.

use ewaste_core::DomainError;
use ewaste_core::domain::Route;
use ewaste_core::ports::{ApiError, GeocodeError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The guard sent the user elsewhere.
    #[error("{}", reason.as_deref().unwrap_or("Please login to continue."))]
    Redirect { route: Route, reason: Option<String> },

    /// Local input that could not be read (files, prompts).
    #[error("{0}")]
    Input(String),

    #[error("Cancelled.")]
    Cancelled,
}

impl AppError {
    pub fn redirect(route: Route, reason: impl Into<String>) -> Self {
        Self::Redirect {
            route,
            reason: Some(reason.into()),
        }
    }

    /// Where the shell lands after this error, if anywhere.
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Redirect { route, .. } => Some(*route),
            _ => None,
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

//! Command handlers - one per screen of the client.

pub mod auth;
pub mod location;
pub mod profile;
pub mod requests;
pub mod shell;
pub mod theme;

use serde::Serialize;

use ewaste_core::domain::Route;

/// Outcome of a form submission: an optional notice and the next screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub next: Route,
}

impl Navigation {
    pub fn to(next: Route) -> Self {
        Self {
            message: None,
            next,
        }
    }

    pub fn with_message(next: Route, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            next,
        }
    }
}

/// Server message, or `default` when the server sent none.
pub(crate) fn message_or(message: Option<String>, default: &str) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

//! Navigation shell: dashboard menu and route entry.

use serde::Serialize;

use ewaste_core::domain::Route;

use crate::error::AppResult;
use crate::guard::{enter, require_session};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct MenuLink {
    pub label: &'static str,
    pub route: Route,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub headline: &'static str,
    pub tagline: &'static str,
    pub links: Vec<MenuLink>,
}

/// The signed-in home screen.
pub async fn dashboard(state: &AppState) -> AppResult<DashboardView> {
    require_session(state).await?;
    Ok(DashboardView {
        headline: "Smart E-Waste Recycling Made Simple",
        tagline: "Responsible disposal. Transparent tracking.",
        links: vec![
            MenuLink {
                label: "Schedule Pickup",
                route: Route::SubmitRequest,
            },
            MenuLink {
                label: "View Status",
                route: Route::ViewRequests,
            },
            MenuLink {
                label: "Manage Profile",
                route: Route::Profile,
            },
        ],
    })
}

/// Resolves a path through the guard, the way typing a URL would.
pub async fn open(state: &AppState, path: &str) -> AppResult<Route> {
    enter(state, path).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::handlers::testing::{FakeBackend, signed_in, test_state};

    #[tokio::test]
    async fn test_dashboard_is_protected() {
        let err = dashboard(&test_state()).await.unwrap_err();
        assert_eq!(err.route(), Some(Route::Login));

        let state = signed_in(Arc::new(FakeBackend::default())).await;
        assert_eq!(dashboard(&state).await.unwrap().links.len(), 3);
    }

    #[tokio::test]
    async fn test_open_resolves_alias() {
        let state = signed_in(Arc::new(FakeBackend::default())).await;
        assert_eq!(open(&state, "/requests").await.unwrap(), Route::ViewRequests);
        assert_eq!(
            open(&state, "/requests/track/12").await.unwrap(),
            Route::TrackRequest(12)
        );
    }
}

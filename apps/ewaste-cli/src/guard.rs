//! Protected route guard.

use ewaste_core::domain::{Route, Session, StorageKey};
use ewaste_core::ports::{ApiError, AuthError};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Returns the stored session or redirects to the login screen.
///
/// A JWT whose `exp` has passed is deleted before redirecting. Tokens the
/// inspector can't read are passed through for the backend to judge.
pub async fn require_session(state: &AppState) -> AppResult<Session> {
    let Some(token) = state.store.get(StorageKey::Token).await? else {
        return Err(AppError::Redirect {
            route: Route::Login,
            reason: None,
        });
    };

    match state.tokens.inspect(&token) {
        Ok(_) => Ok(Session::new(token)),
        Err(AuthError::InvalidToken(reason)) => {
            tracing::debug!(%reason, "Unreadable session token, sending as-is");
            Ok(Session::new(token))
        }
        Err(e @ (AuthError::TokenExpired | AuthError::MissingAuth)) => {
            state.store.remove(StorageKey::Token).await?;
            tracing::warn!("Stored session rejected, token cleared: {e}");
            match e {
                AuthError::TokenExpired => Err(AppError::redirect(Route::Login, e.to_string())),
                _ => Err(AppError::Redirect {
                    route: Route::Login,
                    reason: None,
                }),
            }
        }
    }
}

/// Passes a backend result through. A 401 means the server no longer accepts
/// the stored token, so it is deleted and the user is sent to login.
pub async fn authorized<T>(state: &AppState, result: Result<T, ApiError>) -> AppResult<T> {
    match result {
        Err(err) if err.is_unauthorized() => {
            state.store.remove(StorageKey::Token).await?;
            tracing::warn!(%err, "Backend rejected the session token, token cleared");
            Err(AppError::redirect(
                Route::Login,
                AuthError::TokenExpired.to_string(),
            ))
        }
        result => Ok(result?),
    }
}

/// Resolves a path and applies the guard when the route is protected.
pub async fn enter(state: &AppState, path: &str) -> AppResult<Route> {
    let route = Route::resolve(path);
    if route.is_protected() {
        require_session(state).await?;
    }
    Ok(route)
}

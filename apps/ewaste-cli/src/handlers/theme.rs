//! Theme preference.

use ewaste_core::domain::{StorageKey, Theme};

use crate::error::AppResult;
use crate::state::AppState;

pub async fn current(state: &AppState) -> AppResult<Theme> {
    let stored = state.store.get(StorageKey::Theme).await?;
    Ok(Theme::from_stored(stored.as_deref()))
}

/// Flips light/dark and persists the result.
pub async fn toggle(state: &AppState) -> AppResult<Theme> {
    let theme = current(state).await?.toggled();
    state.store.set(StorageKey::Theme, theme.as_str()).await?;
    tracing::info!(theme = theme.as_str(), "Theme changed");
    Ok(theme)
}

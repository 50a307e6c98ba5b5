//! Profile handlers.

use ewaste_core::DomainError;
use ewaste_core::domain::{Profile, ProfileUpdate, Route};
use ewaste_core::ports::PasswordChange;
use ewaste_core::validation::{validate_new_password, validate_phone};

use super::{Navigation, message_or};
use crate::error::AppResult;
use crate::guard::{authorized, require_session};
use crate::state::AppState;

/// GET /profile/me
pub async fn show(state: &AppState) -> AppResult<Profile> {
    let session = require_session(state).await?;
    authorized(state, state.profiles.fetch_profile(&session).await).await
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// PUT /profile/update with only the fields that were filled in.
pub async fn update(
    state: &AppState,
    name: Option<String>,
    phone: Option<String>,
) -> AppResult<Navigation> {
    let update = ProfileUpdate {
        name: non_blank(name),
        phone: non_blank(phone),
    };
    if update.is_empty() {
        return Err(DomainError::validation("Nothing to update.").into());
    }
    if let Some(phone) = &update.phone {
        validate_phone(phone)?;
    }

    let session = require_session(state).await?;
    let message = authorized(state, state.profiles.update_profile(&session, &update).await).await?;
    Ok(Navigation::with_message(
        Route::Profile,
        message_or(message, "Profile updated successfully"),
    ))
}

/// POST /auth/change-password
pub async fn change_password(
    state: &AppState,
    old_password: &str,
    new_password: &str,
    confirm_password: &str,
) -> AppResult<Navigation> {
    validate_new_password(new_password, confirm_password)?;

    let session = require_session(state).await?;
    let change = PasswordChange {
        old_password: old_password.to_string(),
        new_password: new_password.to_string(),
        confirm_password: confirm_password.to_string(),
    };
    let message = authorized(state, state.auth.change_password(&session, &change).await).await?;
    Ok(Navigation::with_message(
        Route::Profile,
        message_or(message, "Password changed successfully"),
    ))
}

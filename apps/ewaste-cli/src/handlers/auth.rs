//! Authentication handlers: login, registration, OTP and password reset.

use ewaste_core::DomainError;
use ewaste_core::domain::{Route, StorageKey};
use ewaste_core::ports::{ApiError, AuthGrant, Registration};
use ewaste_core::validation::{
    validate_email, validate_new_password, validate_otp, validate_password, validate_phone,
};

use super::{Navigation, message_or};
use crate::error::AppResult;
use crate::state::AppState;

/// Registration form as typed by the user.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

async fn store_token(state: &AppState, grant: &AuthGrant) -> AppResult<bool> {
    let Some(token) = grant.token.as_deref() else {
        return Ok(false);
    };
    state.store.set(StorageKey::Token, token).await?;
    tracing::info!("Session token stored");
    Ok(true)
}

/// Stores the issued token or fails if the backend sent none.
async fn start_session(state: &AppState, grant: AuthGrant) -> AppResult<Navigation> {
    if !store_token(state, &grant).await? {
        return Err(ApiError::Decode("response carried no token".into()).into());
    }
    Ok(Navigation {
        message: grant.message,
        next: Route::Dashboard,
    })
}

/// POST /auth/login
pub async fn login(state: &AppState, email: &str, password: &str) -> AppResult<Navigation> {
    let grant = state.auth.login(email.trim(), password).await?;
    start_session(state, grant).await
}

/// POST /auth/login/request-otp
pub async fn request_login_otp(state: &AppState, email: &str) -> AppResult<Navigation> {
    let email = email.trim();
    validate_email(email)?;
    let message = state.auth.request_login_otp(email).await?;
    Ok(Navigation::with_message(
        Route::Login,
        message_or(message, "OTP sent to your email"),
    ))
}

/// POST /auth/login/verify-otp
pub async fn verify_login_otp(state: &AppState, email: &str, otp: &str) -> AppResult<Navigation> {
    validate_otp(otp)?;
    let grant = state.auth.verify_login_otp(email.trim(), otp.trim()).await?;
    start_session(state, grant).await
}

/// POST /auth/register
pub async fn register(state: &AppState, form: RegisterForm) -> AppResult<Navigation> {
    if form.password != form.confirm_password {
        return Err(DomainError::validation("Passwords do not match.").into());
    }
    validate_phone(&form.phone)?;
    validate_password(&form.password)?;

    let registration = Registration {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        password: form.password,
    };
    let message = state.auth.register(&registration).await?;

    state
        .store
        .set(StorageKey::PendingEmail, &registration.email)
        .await?;

    Ok(Navigation {
        message,
        next: Route::VerifyOtp,
    })
}

/// POST /auth/verify-otp for the email that just registered.
pub async fn verify_otp(state: &AppState, otp: &str) -> AppResult<Navigation> {
    let email = state
        .store
        .get(StorageKey::PendingEmail)
        .await?
        .ok_or(DomainError::MissingPendingEmail)?;
    validate_otp(otp)?;

    let grant = state.auth.verify_otp(&email, otp.trim()).await?;
    store_token(state, &grant).await?;
    state.store.remove(StorageKey::PendingEmail).await?;

    Ok(Navigation {
        message: grant.message,
        next: Route::Dashboard,
    })
}

/// POST /auth/forgot-password
pub async fn forgot_password(state: &AppState, email: &str) -> AppResult<Navigation> {
    let email = email.trim();
    validate_email(email)?;

    let message = state.auth.forgot_password(email).await?;
    state.store.set(StorageKey::ResetEmail, email).await?;

    Ok(Navigation::with_message(
        Route::ResetPassword,
        message_or(message, "OTP sent to your email"),
    ))
}

/// POST /auth/reset-password for the email that requested the reset.
pub async fn reset_password(
    state: &AppState,
    otp: &str,
    new_password: &str,
    confirm_password: &str,
) -> AppResult<Navigation> {
    let email = state
        .store
        .get(StorageKey::ResetEmail)
        .await?
        .ok_or(DomainError::MissingResetEmail)?;
    validate_otp(otp)?;
    validate_new_password(new_password, confirm_password)?;

    let message = state
        .auth
        .reset_password(&email, otp.trim(), new_password)
        .await?;
    state.store.remove(StorageKey::ResetEmail).await?;

    Ok(Navigation::with_message(
        Route::Login,
        message_or(message, "Password reset successful"),
    ))
}

/// Clears the session and returns to the landing page.
pub async fn logout(state: &AppState) -> AppResult<Navigation> {
    state.store.remove(StorageKey::Token).await?;
    tracing::info!("Session token cleared");
    Ok(Navigation::to(Route::Landing))
}

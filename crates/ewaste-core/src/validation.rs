//! Client-side form validation shared by every auth and profile screen.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DomainError;

/// Indian mobile numbers: ten digits, leading 6-9.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9]\d{9}$").expect("phone pattern is valid"));

/// Symbols that satisfy the "one symbol" password rule.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

pub const PASSWORD_MIN_LEN: usize = 8;

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn validate_phone(phone: &str) -> Result<(), DomainError> {
    if is_valid_phone(phone.trim()) {
        Ok(())
    } else {
        Err(DomainError::validation("Enter valid 10-digit phone number"))
    }
}

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(DomainError::validation("Enter valid email address"))
    }
}

pub fn validate_otp(otp: &str) -> Result<(), DomainError> {
    if otp.trim().is_empty() {
        Err(DomainError::validation("OTP is required."))
    } else {
        Ok(())
    }
}

pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if is_strong_password(password) {
        return Ok(());
    }
    Err(DomainError::validation(
        "Password must contain:\n\
         • 1 Capital letter\n\
         • 1 Small letter\n\
         • 1 Number\n\
         • 1 Symbol\n\
         • Minimum 8 characters",
    ))
}

/// Confirmation check followed by the complexity rule.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), DomainError> {
    if password != confirm {
        return Err(DomainError::validation("Passwords do not match."));
    }
    validate_password(password)
}

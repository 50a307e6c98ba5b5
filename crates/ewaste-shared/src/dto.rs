//! Data Transfer Objects - request/response bodies of the EcoCycle backend.

use serde::{Deserialize, Serialize};

/// Request to login with a password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Email plus emailed one-time code. Used by registration and OTP login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerifyRequest {
    pub email: String,
    pub otp: String,
}

/// Body for endpoints that only need an email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Partial profile update; absent fields are left unchanged by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Response of the token-issuing auth endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Response carrying only a status message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Request image as returned by `/requests/{id}/image-data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub base64_data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_password_uses_camel_case() {
        let body = serde_json::to_value(ResetPasswordRequest {
            email: "a@b.c".into(),
            otp: "123456".into(),
            new_password: "Secret1!".into(),
        })
        .unwrap();
        assert_eq!(body["newPassword"], "Secret1!");
    }

    #[test]
    fn test_profile_update_omits_missing_fields() {
        let body = serde_json::to_value(ProfileUpdateRequest {
            name: None,
            phone: Some("9876543210".into()),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "phone": "9876543210" }));
    }

    #[test]
    fn test_image_payload_tolerates_missing_fields() {
        let payload: ImagePayload = serde_json::from_str("{}").unwrap();
        assert!(payload.base64_data.is_none());
    }
}

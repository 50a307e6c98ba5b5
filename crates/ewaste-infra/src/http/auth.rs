//! `AuthApi` over HTTP.

use async_trait::async_trait;
use reqwest::Method;

use ewaste_core::domain::Session;
use ewaste_core::ports::{ApiError, AuthApi, AuthGrant, PasswordChange, Registration};
use ewaste_shared::dto::{
    AuthResponse, ChangePasswordRequest, EmailRequest, LoginRequest, MessageResponse,
    OtpVerifyRequest, RegisterRequest, ResetPasswordRequest,
};

use super::client::{HttpApiClient, Payload, decode};

impl HttpApiClient {
    async fn grant(&self, path: &str, payload: Payload) -> Result<AuthGrant, ApiError> {
        let body: AuthResponse = decode(self.call(Method::POST, path, None, payload).await?)?;
        Ok(AuthGrant {
            message: body.message,
            token: body.token.filter(|t| !t.is_empty()),
        })
    }

    async fn message(
        &self,
        path: &str,
        session: Option<&Session>,
        payload: Payload,
    ) -> Result<Option<String>, ApiError> {
        let body: MessageResponse = decode(self.call(Method::POST, path, session, payload).await?)?;
        Ok(body.message)
    }
}

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.grant("/auth/login", Payload::json(&body)?).await
    }

    async fn register(&self, registration: &Registration) -> Result<Option<String>, ApiError> {
        let body = RegisterRequest {
            name: registration.name.clone(),
            email: registration.email.clone(),
            phone: registration.phone.clone(),
            password: registration.password.clone(),
        };
        self.message("/auth/register", None, Payload::json(&body)?)
            .await
    }

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthGrant, ApiError> {
        let body = OtpVerifyRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        self.grant("/auth/verify-otp", Payload::json(&body)?).await
    }

    async fn request_login_otp(&self, email: &str) -> Result<Option<String>, ApiError> {
        let body = EmailRequest {
            email: email.to_string(),
        };
        self.message("/auth/login/request-otp", None, Payload::json(&body)?)
            .await
    }

    async fn verify_login_otp(&self, email: &str, otp: &str) -> Result<AuthGrant, ApiError> {
        let body = OtpVerifyRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        self.grant("/auth/login/verify-otp", Payload::json(&body)?)
            .await
    }

    async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError> {
        let body = EmailRequest {
            email: email.to_string(),
        };
        self.message("/auth/forgot-password", None, Payload::json(&body)?)
            .await
    }

    async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<Option<String>, ApiError> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
            otp: otp.to_string(),
            new_password: new_password.to_string(),
        };
        self.message("/auth/reset-password", None, Payload::json(&body)?)
            .await
    }

    async fn change_password(
        &self,
        session: &Session,
        change: &PasswordChange,
    ) -> Result<Option<String>, ApiError> {
        let body = ChangePasswordRequest {
            old_password: change.old_password.clone(),
            new_password: change.new_password.clone(),
            confirm_password: change.confirm_password.clone(),
        };
        self.message("/auth/change-password", Some(session), Payload::json(&body)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::HttpClientConfig;

    fn client(server: &MockServer) -> HttpApiClient {
        HttpApiClient::new(HttpClientConfig {
            base_url: server.uri(),
            timeout: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "asha@example.com",
                "password": "Secret1!"
            })))
            .and(header_exists("x-request-id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Login successful",
                "token": "jwt-token"
            })))
            .mount(&server)
            .await;

        let grant = client(&server)
            .login("asha@example.com", "Secret1!")
            .await
            .unwrap();
        assert_eq!(grant.token.as_deref(), Some("jwt-token"));
    }

    #[tokio::test]
    async fn test_login_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Invalid email or password"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .login("asha@example.com", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_unparsable_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/forgot-password"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
            .mount(&server)
            .await;

        let err = client(&server)
            .forgot_password("asha@example.com")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Request failed");
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let server = MockServer::start().await;
        let base_url = server.uri();
        drop(server);

        let client = HttpApiClient::new(HttpClientConfig {
            base_url,
            timeout: None,
        })
        .unwrap();
        let err = client.login("a@b.c", "x").await.unwrap_err();
        assert_eq!(err, ApiError::Unreachable);
    }

    #[tokio::test]
    async fn test_change_password_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/change-password"))
            .and(header("authorization", "Bearer abc"))
            .and(body_json(serde_json::json!({
                "oldPassword": "Old1!pass",
                "newPassword": "New1!pass",
                "confirmPassword": "New1!pass"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Password changed successfully"
            })))
            .mount(&server)
            .await;

        let change = PasswordChange {
            old_password: "Old1!pass".into(),
            new_password: "New1!pass".into(),
            confirm_password: "New1!pass".into(),
        };
        let message = client(&server)
            .change_password(&Session::new("abc"), &change)
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("Password changed successfully"));
    }

    #[tokio::test]
    async fn test_register_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let registration = Registration {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "9876543210".into(),
            password: "Secret1!".into(),
        };
        let message = client(&server).register(&registration).await.unwrap();
        assert_eq!(message, None);
    }
}

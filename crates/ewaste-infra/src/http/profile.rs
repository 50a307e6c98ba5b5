//! `ProfileApi` over HTTP.

use async_trait::async_trait;
use reqwest::Method;

use ewaste_core::domain::{Profile, ProfileUpdate, Session};
use ewaste_core::ports::{ApiError, ProfileApi};
use ewaste_shared::dto::{MessageResponse, ProfileUpdateRequest};

use super::client::{HttpApiClient, Payload, decode};

#[async_trait]
impl ProfileApi for HttpApiClient {
    async fn fetch_profile(&self, session: &Session) -> Result<Profile, ApiError> {
        let body = self
            .call(Method::GET, "/profile/me", Some(session), Payload::Empty)
            .await?;
        decode(body)
    }

    async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<Option<String>, ApiError> {
        let request = ProfileUpdateRequest {
            name: update.name.clone(),
            phone: update.phone.clone(),
        };
        let body = self
            .call(
                Method::PUT,
                "/profile/update",
                Some(session),
                Payload::json(&request)?,
            )
            .await?;
        let body: MessageResponse = decode(body)?;
        Ok(body.message)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
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
    async fn test_fetch_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile/me"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Asha",
                "email": "asha@example.com",
                "phone": "9876543210"
            })))
            .mount(&server)
            .await;

        let profile = client(&server)
            .fetch_profile(&Session::new("tok"))
            .await
            .unwrap();
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.phone, "9876543210");
    }

    #[tokio::test]
    async fn test_update_sends_only_present_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/profile/update"))
            .and(body_json(serde_json::json!({ "name": "Asha K" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Profile updated successfully"
            })))
            .mount(&server)
            .await;

        let update = ProfileUpdate {
            name: Some("Asha K".into()),
            phone: None,
        };
        let message = client(&server)
            .update_profile(&Session::new("tok"), &update)
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("Profile updated successfully"));
    }

    #[tokio::test]
    async fn test_update_rejected_phone() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/profile/update"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "Enter valid 10-digit phone number"
            })))
            .mount(&server)
            .await;

        let update = ProfileUpdate {
            name: None,
            phone: Some("12345".into()),
        };
        let err = client(&server)
            .update_profile(&Session::new("tok"), &update)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Enter valid 10-digit phone number");
    }
}

//! HTTP client for the EcoCycle backend.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use ewaste_core::domain::Session;
use ewaste_core::ports::ApiError;
use ewaste_shared::{ErrorBody, parse_body};

/// Default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081";

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub base_url: String,
    /// No timeout when `None`.
    pub timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl HttpClientConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("EWASTE_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            timeout: std::env::var("EWASTE_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }
}

/// Request body variants the backend accepts.
pub(crate) enum Payload {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// Backend API client. Implements the `AuthApi`, `ProfileApi` and
/// `PickupRequestApi` ports.
#[derive(Clone)]
pub struct HttpApiClient {
    base_url: String,
    http: Client,
}

impl HttpApiClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: config.base_url,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Sends a request and returns the parsed JSON body.
    ///
    /// Bodies that are not JSON read as `{}`. Non-2xx responses become
    /// `ApiError::Server` carrying the body's `message`.
    pub(crate) async fn call(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
        payload: Payload,
    ) -> Result<Value, ApiError> {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!(
            "api_call",
            method = %method,
            path = %path,
            request_id = %request_id,
            status = tracing::field::Empty,
        );

        async move {
            let mut builder = self
                .http
                .request(method, self.url(path))
                .header(REQUEST_ID_HEADER, &request_id);

            if let Some(session) = session {
                let value = HeaderValue::from_str(&session.bearer())
                    .map_err(|_| ApiError::InvalidRequest("Invalid session token".into()))?;
                builder = builder.header(AUTHORIZATION, value);
            }

            builder = match payload {
                Payload::Empty => builder,
                Payload::Json(body) => builder.json(&body),
                Payload::Multipart(form) => builder.multipart(form),
            };

            let response = builder.send().await.map_err(|e| {
                tracing::debug!(error = %e, "Backend unreachable");
                ApiError::Unreachable
            })?;

            let status = response.status();
            tracing::Span::current().record("status", status.as_u16());

            let raw = response.bytes().await.map_err(|e| {
                tracing::debug!(error = %e, "Failed to read response body");
                ApiError::Unreachable
            })?;

            check_status(status, parse_body(&raw))
        }
        .instrument(span)
        .await
    }
}

fn check_status(status: StatusCode, body: Value) -> Result<Value, ApiError> {
    if status.is_success() {
        return Ok(body);
    }
    let message = ErrorBody::from_value(&body).into_message();
    tracing::debug!(status = status.as_u16(), %message, "Backend rejected request");
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

impl Payload {
    pub(crate) fn json<T: serde::Serialize>(body: &T) -> Result<Self, ApiError> {
        serde_json::to_value(body)
            .map(Self::Json)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))
    }
}

/// Deserializes a success body into a typed value.
pub(crate) fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_slashes() {
        let client = HttpApiClient::new(HttpClientConfig {
            base_url: "http://localhost:8081/".into(),
            timeout: None,
        })
        .unwrap();
        assert_eq!(client.url("/auth/login"), "http://localhost:8081/auth/login");
    }

    #[test]
    fn test_empty_message_falls_back() {
        let err = check_status(
            StatusCode::BAD_REQUEST,
            serde_json::json!({ "message": "" }),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Request failed");
        assert_eq!(err.status(), Some(400));
    }
}

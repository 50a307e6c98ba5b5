//! Error body shape shared by every backend endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fallback shown when a failed response has no `message`.
pub const DEFAULT_ERROR_MESSAGE: &str = "Request failed";

/// Failed responses carry `{ "message": "..." }`, sometimes nothing at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Reads the body leniently. A `message` that is null, `false`, zero or
    /// blank counts as absent; other non-string values are shown as JSON text.
    pub fn from_value(value: &Value) -> Self {
        let message = match value.get("message") {
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
            Some(Value::Bool(true)) => Some("true".to_string()),
            Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
            Some(other @ (Value::Array(_) | Value::Object(_))) => Some(other.to_string()),
            _ => None,
        };
        Self { message }
    }

    pub fn into_message(self) -> String {
        self.message
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
    }
}

/// Parses a response body as JSON, falling back to `{}`.
pub fn parse_body(raw: &[u8]) -> Value {
    serde_json::from_slice(raw).unwrap_or_else(|_| Value::Object(Default::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_fallback() {
        let body = ErrorBody::from_value(&parse_body(b"<html>oops</html>"));
        assert_eq!(body.into_message(), "Request failed");

        let body = ErrorBody::from_value(&parse_body(br#"{"message":"Invalid OTP"}"#));
        assert_eq!(body.into_message(), "Invalid OTP");
    }

    #[test]
    fn test_non_string_message_is_stringified() {
        let body = ErrorBody::from_value(&serde_json::json!({ "message": 42 }));
        assert_eq!(body.into_message(), "42");

        let body = ErrorBody::from_value(&serde_json::json!({ "message": { "field": "email" } }));
        assert_eq!(body.into_message(), r#"{"field":"email"}"#);
    }

    #[test]
    fn test_falsy_message_falls_back() {
        for message in [
            serde_json::json!(null),
            serde_json::json!(false),
            serde_json::json!(0),
            serde_json::json!(""),
        ] {
            let body = ErrorBody::from_value(&serde_json::json!({ "message": message }));
            assert_eq!(body.into_message(), "Request failed");
        }
    }
}

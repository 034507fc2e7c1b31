//! Error payload surfaced from failed backend requests

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// What a failed request left behind, passed to the view verbatim
///
/// `status` is `None` when no HTTP response arrived at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub status: Option<u16>,
    pub body: JsonValue,
}

impl ErrorPayload {
    pub fn new(status: Option<u16>, body: JsonValue) -> Self {
        Self { status, body }
    }

    /// Build a payload from an HTTP response body
    ///
    /// JSON bodies are kept as JSON, anything else as a string.
    pub fn from_response(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string()))
        };
        Self::new(Some(status), body)
    }

    /// Payload for a request that never got a response
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, JsonValue::String(message.into()))
    }

    /// Short single-line summary for logs and terminals
    pub fn summary(&self) -> String {
        let body = match &self.body {
            JsonValue::Null => String::new(),
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        match (self.status, body.is_empty()) {
            (Some(status), true) => format!("HTTP {}", status),
            (Some(status), false) => format!("HTTP {}: {}", status, body),
            (None, _) => body,
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body_is_parsed() {
        let payload = ErrorPayload::from_response(500, r#"{"message": "boom"}"#);
        assert_eq!(payload.status, Some(500));
        assert_eq!(payload.body, json!({"message": "boom"}));
    }

    #[test]
    fn test_text_body_is_kept_verbatim() {
        let payload = ErrorPayload::from_response(502, "Bad Gateway");
        assert_eq!(payload.body, json!("Bad Gateway"));
        assert_eq!(payload.summary(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_empty_body() {
        let payload = ErrorPayload::from_response(401, "");
        assert_eq!(payload.body, JsonValue::Null);
        assert_eq!(payload.to_string(), "HTTP 401");
    }

    #[test]
    fn test_transport_failure() {
        let payload = ErrorPayload::transport("connection refused");
        assert_eq!(payload.status, None);
        assert_eq!(payload.summary(), "connection refused");
    }
}

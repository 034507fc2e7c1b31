//! HTTP profile backend
//!
//! Talks to the backend's `/user`, `/project` and `/logout` endpoints with
//! `reqwest`. No timeout and no retry are configured: a request either
//! completes or fails once.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde_json::Value as JsonValue;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{ErrorPayload, Project, User};
use crate::ports::{BackendResult, ProfileBackend};

const USER_AGENT: &str = concat!("profile-console/", env!("CARGO_PKG_VERSION"));

pub const USER_PATH: &str = "/user";
pub const PROJECT_PATH: &str = "/project";
pub const LOGOUT_PATH: &str = "/logout";

/// HTTP implementation of [`ProfileBackend`]
#[derive(Debug, Clone)]
pub struct HttpProfileBackend {
    client: Client,
    base_url: String,
}

impl HttpProfileBackend {
    /// Create a client for the backend rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = validate_base_url(base_url)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the status and body of a 2xx response
    async fn send(&self, request: RequestBuilder, path: &str) -> BackendResult<(u16, String)> {
        tracing::debug!(backend = %self.base_url, path, "sending request");

        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_request_error(path, e))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            ErrorPayload::new(
                Some(status),
                JsonValue::String(format!("Failed to read response from {}: {}", path, e)),
            )
        })?;

        if !(200..300).contains(&status) {
            return Err(ErrorPayload::from_response(status, &text));
        }

        Ok((status, text))
    }

    /// Map request errors to payloads with a readable message
    fn map_request_error(&self, path: &str, error: reqwest::Error) -> ErrorPayload {
        if error.is_connect() {
            ErrorPayload::transport(format!("Unable to connect to backend at {}", self.base_url))
        } else {
            ErrorPayload::transport(format!("Request to {} failed: {}", path, error))
        }
    }
}

#[async_trait]
impl ProfileBackend for HttpProfileBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_user(&self) -> BackendResult<User> {
        let (status, text) = self
            .send(self.client.get(self.endpoint(USER_PATH)), USER_PATH)
            .await?;
        decode_json(status, text).map(User::new)
    }

    async fn fetch_projects(&self) -> BackendResult<Vec<Project>> {
        let (status, text) = self
            .send(self.client.get(self.endpoint(PROJECT_PATH)), PROJECT_PATH)
            .await?;
        decode_json(status, text).map(Project::list_from_json)
    }

    async fn logout(&self) -> BackendResult<()> {
        self.send(self.client.post(self.endpoint(LOGOUT_PATH)), LOGOUT_PATH)
            .await
            .map(|_| ())
    }
}

/// Check that `base_url` is an absolute http(s) URL and trim trailing slashes
pub fn validate_base_url(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url)
        .map_err(|e| Error::config(format!("Invalid backend URL '{}': {}", base_url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "Backend URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }

    Ok(base_url.trim_end_matches('/').to_string())
}

/// Decode a success body; an empty body reads as `null`
fn decode_json(status: u16, text: String) -> BackendResult<JsonValue> {
    if text.trim().is_empty() {
        return Ok(JsonValue::Null);
    }
    serde_json::from_str(&text)
        .map_err(|_| ErrorPayload::new(Some(status), JsonValue::String(text)))
}

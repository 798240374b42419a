// Review generator HTTP client.
// Handles base URL resolution, JSON request/response processing, and raw file downloads.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{ConsoleError, Result};

const MAX_ERROR_BODY: usize = 200;

/// Transport seam between action handlers and the network.
///
/// Paths are relative to the API prefix unless they start with `/`, in which
/// case they are resolved against the server root (used for `/health`).
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body and parse the JSON reply.
    async fn post_json(&self, path: &str, body: Value) -> Result<Value>;

    /// GET and parse a JSON reply.
    async fn get_json(&self, path: &str) -> Result<Value>;

    /// GET raw bytes (artifact downloads).
    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>>;

    /// Absolute URL for a path, as shown to the user.
    fn url(&self, path: &str) -> String;
}

/// reqwest-backed client for the review generator API.
pub struct ReviewClient {
    client: Client,
    base_url: String,
    api_prefix: String,
}

impl ReviewClient {
    /// Create a new client for the given server.
    pub fn new(base_url: &str, api_prefix: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("review-console"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ConsoleError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_prefix: format!("/{}", api_prefix.trim_matches('/')),
        })
    }

    /// Create a client from the resolved application config.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            &config.api_prefix,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// Parse a response body as JSON regardless of status.
    ///
    /// The server reports failures as `{success: false, error}` with 4xx/5xx
    /// codes, so those bodies must reach the envelope decoder. Only bodies that
    /// are not JSON are turned into status errors here.
    async fn read_json(&self, response: Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await.map_err(ConsoleError::Http)?;

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(ConsoleError::Status {
                status,
                body: error_body(&text),
            }),
            Err(e) => Err(ConsoleError::Json(e)),
        }
    }
}

/// Error bodies are cut to a status-line sized excerpt.
fn error_body(text: &str) -> String {
    text.chars().take(MAX_ERROR_BODY).collect()
}

#[async_trait]
impl Transport for ReviewClient {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ConsoleError::Http)?;
        tracing::debug!(%url, status = %response.status(), "response");
        self.read_json(response).await
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(ConsoleError::Http)?;
        tracing::debug!(%url, status = %response.status(), "response");
        self.read_json(response).await
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url(path);
        tracing::debug!(%url, "GET (download)");
        let response = self.client.get(&url).send().await.map_err(ConsoleError::Http)?;

        let status = response.status();
        if !status.is_success() {
            // Missing files come back as a JSON envelope.
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(text);
            return Err(ConsoleError::Status {
                status,
                body: error_body(&message),
            });
        }

        let bytes = response.bytes().await.map_err(ConsoleError::Http)?;
        Ok(bytes.to_vec())
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}/{}", self.base_url, self.api_prefix, path)
        }
    }
}

//! Reqwest Transport - Implementation of ApiTransport over HTTPS.
//!
//! Every request carries the static API key as a bearer token.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ReqwestTransportConfig::new(api_key, "https://api.example.com/v2")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let transport = ReqwestTransport::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;

use crate::ports::{ApiTransport, TransportError};

/// Longest error body kept in a `TransportError`.
const MAX_ERROR_BODY: usize = 500;

/// Configuration for the reqwest transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransportConfig {
    /// Bearer credential.
    api_key: Secret<String>,
    /// Base URL every request path is appended to.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ReqwestTransportConfig {
    /// Creates a new configuration with the given API key and base URL.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Support API transport backed by `reqwest`.
pub struct ReqwestTransport {
    config: ReqwestTransportConfig,
    client: Client,
}

impl ReqwestTransport {
    /// Creates a new transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Network` if the HTTP client cannot be built.
    pub fn new(config: ReqwestTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Joins the base URL and a request path.
    fn url(&self, path: &str) -> String {
        join_url(&self.config.base_url, path)
    }

    /// Converts non-2xx responses into errors.
    async fn check_status(path: &str, response: Response) -> Result<Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), path, &body))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn status_error(status: u16, path: &str, body: &str) -> TransportError {
    match status {
        401 | 403 => TransportError::Unauthorized { status },
        _ => {
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            TransportError::status(status, path, body)
        }
    }
}

#[async_trait]
impl ApiTransport for ReqwestTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, TransportError> {
        tracing::debug!(path, "GET");

        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(self.config.api_key())
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    TransportError::network(format!("Connection failed: {}", e))
                } else {
                    TransportError::network(e.to_string())
                }
            })?;

        let response = Self::check_status(path, response).await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ReqwestTransportConfig::new("key", "https://api.example.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "key");
    }

    #[test]
    fn config_debug_hides_api_key() {
        let config = ReqwestTransportConfig::new("super-secret", "https://api.example.com");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn url_joining_handles_slashes() {
        assert_eq!(join_url("https://h/v2/", "/chats"), "https://h/v2/chats");
        assert_eq!(join_url("https://h/v2", "chats/1/messages"), "https://h/v2/chats/1/messages");
    }

    #[test]
    fn auth_statuses_map_to_unauthorized() {
        assert_eq!(status_error(401, "/chats", ""), TransportError::Unauthorized { status: 401 });
        assert_eq!(status_error(403, "/chats", ""), TransportError::Unauthorized { status: 403 });
    }

    #[test]
    fn other_statuses_keep_a_truncated_body() {
        let body = "x".repeat(2000);
        match status_error(502, "/chats", &body) {
            TransportError::Status { status, path, body } => {
                assert_eq!(status, 502);
                assert_eq!(path, "/chats");
                assert_eq!(body.len(), MAX_ERROR_BODY);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn new_builds_client() {
        let transport = ReqwestTransport::new(
            ReqwestTransportConfig::new("k", "https://api.example.com").with_timeout(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(transport.url("/chats"), "https://api.example.com/chats");
    }
}

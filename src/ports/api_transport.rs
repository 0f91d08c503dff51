//! API Transport Port - Interface for authenticated GET requests against the
//! support API.
//!
//! The export pipeline only ever reads; every call is a GET of a path
//! relative to the configured base URL, with query parameters, returning a
//! parsed JSON body.
//!
//! # Example
//!
//! ```ignore
//! let page = transport
//!     .get("/chats", &[("offset", "0".to_string()), ("limit", "100".to_string())])
//!     .await?;
//! ```

use async_trait::async_trait;
use serde_json::Value;

/// Port for reading JSON resources from the support API.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issues a GET for `path` with `query` and returns the decoded body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` for network failures, non-2xx statuses and
    /// bodies that are not JSON.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, TransportError>;
}

/// Errors from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The credential was rejected.
    #[error("authentication failed (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other non-2xx status.
    #[error("HTTP {status} from {path}: {body}")]
    Status {
        status: u16,
        path: String,
        body: String,
    },

    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The body was not the JSON we expected.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl TransportError {
    /// Creates a status error.
    pub fn status(status: u16, path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            path: path.into(),
            body: body.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// True for a 404, which message probing treats as "try the next shape".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_path_and_code() {
        let err = TransportError::status(500, "/chats", "boom");
        assert_eq!(err.to_string(), "HTTP 500 from /chats: boom");
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_is_detected() {
        assert!(TransportError::status(404, "/chats/1/messages", "").is_not_found());
        assert!(!TransportError::network("reset").is_not_found());
    }

    #[test]
    fn unauthorized_display() {
        let err = TransportError::Unauthorized { status: 401 };
        assert!(err.to_string().contains("authentication failed"));
    }
}

//! Mock API Transport for testing.
//!
//! Serves canned JSON bodies or errors per request path so the export
//! pipeline can run without a live support API.
//!
//! # Features
//!
//! - Replies keyed by path, optionally narrowed to one `offset` for paging
//! - Error injection per route
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new()
//!     .with_page("/chats", 0, json!({"data": [...], "meta": {"total": 150}}))
//!     .with_page("/chats", 100, json!({"data": [...], "meta": {"total": 150}}))
//!     .with_json("/chats/1/messages", json!({"data": [{"text": "hi"}]}));
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::ports::{ApiTransport, TransportError};

/// A configured reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this body.
    Json(Value),
    /// Fail with this error.
    Error(TransportError),
}

/// A request seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a query parameter, if sent.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Mock transport for testing.
///
/// Unknown routes answer with HTTP 404.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<String, MockReply>>>,
    calls: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Creates a mock with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for every request to `path`.
    pub fn with_json(self, path: impl Into<String>, body: Value) -> Self {
        self.set(path, MockReply::Json(body));
        self
    }

    /// Serves `body` for requests to `path` with the given `offset`.
    pub fn with_page(self, path: &str, offset: usize, body: Value) -> Self {
        self.set(page_key(path, &offset.to_string()), MockReply::Json(body));
        self
    }

    /// Fails every request to `path` with `error`.
    pub fn with_error(self, path: impl Into<String>, error: TransportError) -> Self {
        self.set(path, MockReply::Error(error));
        self
    }

    /// Replaces the reply for a route after construction.
    pub fn set(&self, route: impl Into<String>, reply: MockReply) {
        self.routes.lock().unwrap().insert(route.into(), reply);
    }

    /// Returns all recorded requests.
    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the number of requests made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns the number of requests made to `path`.
    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.path == path)
            .count()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn reply_for(&self, path: &str, query: &[(&str, String)]) -> Option<MockReply> {
        let routes = self.routes.lock().unwrap();
        let paged = query
            .iter()
            .find(|(key, _)| *key == "offset")
            .and_then(|(_, offset)| routes.get(&page_key(path, offset)));
        paged.or_else(|| routes.get(path)).cloned()
    }
}

fn page_key(path: &str, offset: &str) -> String {
    format!("{}?offset={}", path, offset)
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(RecordedRequest {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        });

        match self.reply_for(path, query) {
            Some(MockReply::Json(body)) => Ok(body),
            Some(MockReply::Error(error)) => Err(error),
            None => Err(TransportError::status(404, path, "no mock route")),
        }
    }
}

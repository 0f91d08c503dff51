//! ConversationFetcher - pages through the conversation list endpoint.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::domain::conversation::Conversation;
use crate::domain::foundation::Timestamp;
use crate::ports::{ApiTransport, TransportError};

/// Path of the conversation list endpoint.
pub const CONVERSATIONS_PATH: &str = "/chats";

#[derive(Debug, Deserialize)]
struct ListPage {
    data: Option<Vec<Value>>,
    meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    total: Option<u64>,
}

/// Fetches every conversation created since a given date.
pub struct ConversationFetcher {
    transport: Arc<dyn ApiTransport>,
    page_size: usize,
    page_delay: Duration,
}

impl ConversationFetcher {
    pub fn new(transport: Arc<dyn ApiTransport>, page_size: usize, page_delay: Duration) -> Self {
        Self {
            transport,
            page_size: page_size.max(1),
            page_delay,
        }
    }

    /// Requests pages by offset until the reported total is covered.
    ///
    /// Items are kept in API order when created at or after `from`.
    /// Malformed items are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Any transport error aborts the fetch.
    pub async fn fetch(&self, from: &Timestamp) -> Result<Vec<Conversation>, TransportError> {
        let mut kept = Vec::new();
        let mut offset = 0usize;

        loop {
            let query = [
                ("offset", offset.to_string()),
                ("limit", self.page_size.to_string()),
                ("sort", "created_at".to_string()),
                ("order", "desc".to_string()),
            ];
            let body = self.transport.get(CONVERSATIONS_PATH, &query).await?;
            let page: ListPage = serde_json::from_value(body)
                .map_err(|e| TransportError::decode(format!("conversation page: {}", e)))?;

            let items = page.data.unwrap_or_default();
            let total = page.meta.and_then(|meta| meta.total);

            let before = kept.len();
            for item in &items {
                match Conversation::from_json(item) {
                    Ok(conversation) if conversation.is_created_since(from) => kept.push(conversation),
                    Ok(_) => {}
                    Err(e) => warn!(offset, error = %e, "Skipping malformed conversation"),
                }
            }

            info!(
                offset,
                received = items.len(),
                kept = kept.len() - before,
                total = ?total,
                "Fetched conversation page"
            );

            // A missing total or an empty page ends paging as well.
            let covered = match total {
                Some(total) => total <= (offset + self.page_size) as u64,
                None => true,
            };
            if covered || items.is_empty() {
                break;
            }

            offset += self.page_size;
            if !self.page_delay.is_zero() {
                sleep(self.page_delay).await;
            }
        }

        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::MockTransport;
    use serde_json::json;

    fn item(id: u32, created: &str) -> Value {
        json!({"id": id, "created_at": created})
    }

    fn fetcher(transport: &MockTransport, page_size: usize) -> ConversationFetcher {
        ConversationFetcher::new(Arc::new(transport.clone()), page_size, Duration::ZERO)
    }

    fn from() -> Timestamp {
        Timestamp::parse_str("2024-01-01").unwrap()
    }

    #[tokio::test]
    async fn pages_until_total_is_covered() {
        let transport = MockTransport::new()
            .with_page("/chats", 0, json!({"data": [item(1, "2024-02-01"), item(2, "2024-02-02")], "meta": {"total": 5}}))
            .with_page("/chats", 2, json!({"data": [item(3, "2024-02-03"), item(4, "2024-02-04")], "meta": {"total": 5}}))
            .with_page("/chats", 4, json!({"data": [item(5, "2024-02-05")], "meta": {"total": 5}}));

        let conversations = fetcher(&transport, 2).fetch(&from()).await.unwrap();

        let ids: Vec<_> = conversations.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(transport.calls_to("/chats"), 3);

        let offsets: Vec<_> = transport
            .calls()
            .iter()
            .map(|c| c.param("offset").unwrap().to_string())
            .collect();
        assert_eq!(offsets, vec!["0", "2", "4"]);
    }

    #[tokio::test]
    async fn sends_paging_and_sort_parameters() {
        let transport = MockTransport::new().with_json("/chats", json!({"data": [], "meta": {"total": 0}}));

        fetcher(&transport, 100).fetch(&from()).await.unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.param("offset"), Some("0"));
        assert_eq!(call.param("limit"), Some("100"));
        assert_eq!(call.param("sort"), Some("created_at"));
        assert_eq!(call.param("order"), Some("desc"));
    }

    #[tokio::test]
    async fn date_filter_is_inclusive() {
        let transport = MockTransport::new().with_json(
            "/chats",
            json!({"data": [
                item(1, "2023-12-31T23:59:59Z"),
                {"id": 2, "created_at": 1_704_067_200},
                {"id": 3, "createdAt": "2024-06-01T00:00:00Z"},
                {"id": 4}
            ], "meta": {"total": 4}}),
        );

        let conversations = fetcher(&transport, 100).fetch(&from()).await.unwrap();

        let ids: Vec<_> = conversations.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[tokio::test]
    async fn shrinking_total_still_terminates() {
        let transport = MockTransport::new()
            .with_page("/chats", 0, json!({"data": [item(1, "2024-02-01"), item(2, "2024-02-02")], "meta": {"total": 10}}))
            .with_page("/chats", 2, json!({"data": [item(3, "2024-02-03")], "meta": {"total": 3}}));

        let conversations = fetcher(&transport, 2).fetch(&from()).await.unwrap();

        assert_eq!(conversations.len(), 3);
        assert_eq!(transport.calls_to("/chats"), 2);
    }

    #[tokio::test]
    async fn empty_page_or_missing_total_stops() {
        let transport = MockTransport::new()
            .with_page("/chats", 0, json!({"data": [item(1, "2024-02-01")], "meta": {"total": 999}}))
            .with_page("/chats", 1, json!({"data": [], "meta": {"total": 999}}));
        assert_eq!(fetcher(&transport, 1).fetch(&from()).await.unwrap().len(), 1);
        assert_eq!(transport.calls_to("/chats"), 2);

        let transport = MockTransport::new().with_json("/chats", json!({"data": [item(1, "2024-02-01")]}));
        assert_eq!(fetcher(&transport, 1).fetch(&from()).await.unwrap().len(), 1);
        assert_eq!(transport.calls_to("/chats"), 1);
    }

    #[tokio::test]
    async fn malformed_items_are_skipped() {
        let transport = MockTransport::new().with_json(
            "/chats",
            json!({"data": ["junk", {"status": "no id"}, item(7, "2024-03-01")], "meta": {"total": 3}}),
        );

        let conversations = fetcher(&transport, 100).fetch(&from()).await.unwrap();

        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].id.as_str(), "7");
    }

    #[tokio::test]
    async fn out_of_range_timestamps_drop_only_that_item() {
        let transport = MockTransport::new().with_json(
            "/chats",
            json!({"data": [
                {"id": 1, "created_at": -1e30},
                {"id": 2, "created_at": i64::MIN},
                {"id": 3, "created_at": "99999999999999999999"},
                item(4, "2024-03-01")
            ], "meta": {"total": 4}}),
        );

        let conversations = fetcher(&transport, 100).fetch(&from()).await.unwrap();

        let ids: Vec<_> = conversations.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, vec!["4"]);
    }

    #[tokio::test]
    async fn transport_errors_are_fatal() {
        let transport = MockTransport::new()
            .with_page("/chats", 0, json!({"data": [item(1, "2024-02-01")], "meta": {"total": 2}}))
            .with_error("/chats?offset=1", TransportError::status(502, "/chats", "bad gateway"));

        let err = fetcher(&transport, 1).fetch(&from()).await.unwrap_err();

        assert!(matches!(err, TransportError::Status { status: 502, .. }));
    }

    #[tokio::test]
    async fn non_object_page_is_a_decode_error() {
        let transport = MockTransport::new().with_json("/chats", json!({"data": "nope"}));

        let err = fetcher(&transport, 100).fetch(&from()).await.unwrap_err();

        assert!(matches!(err, TransportError::Decode(_)));
    }
}

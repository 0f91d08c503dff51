//! MessageFetcher - probes candidate endpoints for a conversation's messages.

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::ChatId;
use crate::ports::ApiTransport;

/// Page limit sent to every message endpoint.
const MESSAGE_PAGE_LIMIT: usize = 100;

/// Candidate message endpoints, probed in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageEndpoint {
    /// `/chats/{id}/messages`
    ChatMessages,
    /// `/conversations/{id}/messages`
    ConversationMessages,
    /// `/messages?chat_id={id}`
    MessagesByChat,
    /// `/chats/{id}`
    ChatDetail,
}

impl MessageEndpoint {
    /// Probe order.
    pub fn all() -> &'static [MessageEndpoint] {
        &[
            MessageEndpoint::ChatMessages,
            MessageEndpoint::ConversationMessages,
            MessageEndpoint::MessagesByChat,
            MessageEndpoint::ChatDetail,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MessageEndpoint::ChatMessages => "chat_messages",
            MessageEndpoint::ConversationMessages => "conversation_messages",
            MessageEndpoint::MessagesByChat => "messages_by_chat",
            MessageEndpoint::ChatDetail => "chat_detail",
        }
    }

    pub fn path(&self, id: &ChatId) -> String {
        match self {
            MessageEndpoint::ChatMessages => format!("/chats/{}/messages", id),
            MessageEndpoint::ConversationMessages => format!("/conversations/{}/messages", id),
            MessageEndpoint::MessagesByChat => "/messages".to_string(),
            MessageEndpoint::ChatDetail => format!("/chats/{}", id),
        }
    }

    pub fn query(&self, id: &ChatId) -> Vec<(&'static str, String)> {
        match self {
            MessageEndpoint::ChatMessages | MessageEndpoint::ConversationMessages => {
                vec![("limit", MESSAGE_PAGE_LIMIT.to_string())]
            }
            MessageEndpoint::MessagesByChat => vec![
                ("chat_id", id.to_string()),
                ("limit", MESSAGE_PAGE_LIMIT.to_string()),
            ],
            MessageEndpoint::ChatDetail => Vec::new(),
        }
    }
}

/// Returns the first non-empty array under `data` or `messages`.
pub fn extract_messages(body: &Value) -> Option<&Vec<Value>> {
    ["data", "messages"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_array))
        .find(|items| !items.is_empty())
}

/// Retrieves raw message payloads for conversations without inline messages.
pub struct MessageFetcher {
    transport: Arc<dyn ApiTransport>,
    max_messages: usize,
}

impl MessageFetcher {
    pub fn new(transport: Arc<dyn ApiTransport>, max_messages: usize) -> Self {
        Self {
            transport,
            max_messages,
        }
    }

    /// Tries each endpoint in turn and returns the first non-empty list,
    /// truncated to `max_messages`.
    ///
    /// Never fails: endpoint errors are logged and the next endpoint is
    /// tried. An empty list means no endpoint produced messages.
    pub async fn fetch(&self, id: &ChatId) -> Vec<Value> {
        for endpoint in MessageEndpoint::all() {
            let path = endpoint.path(id);
            match self.transport.get(&path, &endpoint.query(id)).await {
                Ok(body) => {
                    if let Some(items) = extract_messages(&body) {
                        debug!(
                            chat_id = %id,
                            endpoint = endpoint.name(),
                            count = items.len(),
                            "Found messages"
                        );
                        return items.iter().take(self.max_messages).cloned().collect();
                    }
                    debug!(chat_id = %id, endpoint = endpoint.name(), "No messages at endpoint");
                }
                Err(e) => {
                    debug!(chat_id = %id, endpoint = endpoint.name(), error = %e, "Message endpoint failed");
                }
            }
        }

        debug!(chat_id = %id, "No endpoint returned messages");
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::MockTransport;
    use crate::ports::TransportError;
    use serde_json::json;

    fn id() -> ChatId {
        ChatId::new("42").unwrap()
    }

    fn fetcher(transport: &MockTransport, max: usize) -> MessageFetcher {
        MessageFetcher::new(Arc::new(transport.clone()), max)
    }

    #[test]
    fn endpoints_build_expected_requests() {
        let id = id();
        assert_eq!(MessageEndpoint::ChatMessages.path(&id), "/chats/42/messages");
        assert_eq!(MessageEndpoint::ConversationMessages.path(&id), "/conversations/42/messages");
        assert_eq!(MessageEndpoint::MessagesByChat.path(&id), "/messages");
        assert_eq!(MessageEndpoint::ChatDetail.path(&id), "/chats/42");
        assert_eq!(
            MessageEndpoint::MessagesByChat.query(&id),
            vec![("chat_id", "42".to_string()), ("limit", "100".to_string())]
        );
        assert!(MessageEndpoint::ChatDetail.query(&id).is_empty());
    }

    #[test]
    fn extract_prefers_data_and_skips_empty_arrays() {
        let body = json!({"data": [{"text": "a"}], "messages": [{"text": "b"}]});
        assert_eq!(extract_messages(&body).unwrap()[0]["text"], "a");

        let body = json!({"data": [], "messages": [{"text": "b"}]});
        assert_eq!(extract_messages(&body).unwrap()[0]["text"], "b");

        assert!(extract_messages(&json!({"data": {}})).is_none());
        assert!(extract_messages(&json!([1, 2])).is_none());
    }

    #[tokio::test]
    async fn first_endpoint_with_messages_wins() {
        let transport = MockTransport::new()
            .with_json("/chats/42/messages", json!({"data": [{"text": "one"}]}))
            .with_json("/conversations/42/messages", json!({"data": [{"text": "two"}]}));

        let messages = fetcher(&transport, 100).fetch(&id()).await;

        assert_eq!(messages, vec![json!({"text": "one"})]);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn falls_through_failures_and_empty_lists() {
        let transport = MockTransport::new()
            .with_error("/chats/42/messages", TransportError::network("reset"))
            .with_json("/conversations/42/messages", json!({"data": []}))
            .with_json("/messages", json!({"messages": [{"text": "three"}]}));

        let messages = fetcher(&transport, 100).fetch(&id()).await;

        assert_eq!(messages, vec![json!({"text": "three"})]);
        let paths: Vec<_> = transport.calls().into_iter().map(|c| c.path).collect();
        assert_eq!(paths, vec!["/chats/42/messages", "/conversations/42/messages", "/messages"]);
        assert_eq!(transport.calls()[2].param("chat_id"), Some("42"));
    }

    #[tokio::test]
    async fn exhausted_endpoints_yield_empty_list() {
        let transport = MockTransport::new();

        let messages = fetcher(&transport, 100).fetch(&id()).await;

        assert!(messages.is_empty());
        assert_eq!(transport.call_count(), 4);
    }

    #[tokio::test]
    async fn truncates_to_max_messages() {
        let items: Vec<_> = (0..5).map(|i| json!({"text": i.to_string()})).collect();
        let transport = MockTransport::new().with_json("/chats/42/messages", json!({"data": items}));

        let messages = fetcher(&transport, 3).fetch(&id()).await;

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2]["text"], "2");
    }
}

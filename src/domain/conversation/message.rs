//! Canonical message record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{any_flag, first_present, first_string};
use crate::domain::foundation::{Timestamp, ValidationError};

const TIMESTAMP_KEYS: &[&str] = &["created_at", "createdAt", "timestamp", "sent_at", "date"];
const AUTHOR_KEYS: &[&str] = &["from", "author_type", "sender_type"];
const AGENT_FLAG_KEYS: &[&str] = &["from_agent", "fromAgent", "is_agent"];
const BODY_KEYS: &[&str] = &["text", "body", "content", "message"];

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Author {
    /// The customer. Default when nothing marks the message as an agent's.
    User,
    /// A support agent or operator.
    Agent,
}

impl Author {
    /// Tag used in transcripts, e.g. `USER`.
    pub fn tag(&self) -> &'static str {
        match self {
            Author::User => "USER",
            Author::Agent => "AGENT",
        }
    }
}

/// Whether a message carries conversation content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Content,
    /// System notices such as assignment changes (`type: "tech"`).
    Technical,
}

/// A single message, normalized from the remote payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sent_at: Option<Timestamp>,
    pub author: Author,
    pub kind: MessageKind,
    pub body: String,
}

impl Message {
    /// Creates a content message without a timestamp.
    pub fn new(author: Author, body: impl Into<String>) -> Self {
        Self {
            sent_at: None,
            author,
            kind: MessageKind::Content,
            body: body.into(),
        }
    }

    /// Sets the send time.
    pub fn at(mut self, sent_at: Timestamp) -> Self {
        self.sent_at = Some(sent_at);
        self
    }

    /// Marks the message as technical.
    pub fn technical(mut self) -> Self {
        self.kind = MessageKind::Technical;
        self
    }

    /// True for messages excluded from transcripts.
    pub fn is_technical(&self) -> bool {
        self.kind == MessageKind::Technical
    }

    /// Normalizes one raw message.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the entry is not a JSON object.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let obj = value.as_object().ok_or_else(|| {
            ValidationError::invalid_format("message", "expected a JSON object")
        })?;

        let sent_at = first_present(obj, TIMESTAMP_KEYS).and_then(Timestamp::from_json);

        let named_agent = AUTHOR_KEYS
            .iter()
            .filter_map(|key| obj.get(*key).and_then(Value::as_str))
            .any(|who| who.eq_ignore_ascii_case("agent") || who.eq_ignore_ascii_case("operator"));
        let author = if named_agent || any_flag(obj, AGENT_FLAG_KEYS) {
            Author::Agent
        } else {
            Author::User
        };

        let kind = match obj.get("type").and_then(Value::as_str) {
            Some(t) if t.eq_ignore_ascii_case("tech") => MessageKind::Technical,
            _ => MessageKind::Content,
        };

        Ok(Self {
            sent_at,
            author,
            kind,
            body: first_string(obj, BODY_KEYS).unwrap_or_default(),
        })
    }

    /// Normalizes a list of raw messages, failing on the first bad entry.
    pub fn from_json_list(values: &[Value]) -> Result<Vec<Self>, ValidationError> {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                Self::from_json(value).map_err(|_| {
                    ValidationError::invalid_format(
                        format!("messages[{}]", i),
                        "expected a JSON object",
                    )
                })
            })
            .collect()
    }
}

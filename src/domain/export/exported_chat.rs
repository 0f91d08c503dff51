//! ExportedChat - the flattened, cached form of one conversation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChatId, Timestamp};

/// One exported conversation with its consolidated transcript.
///
/// Created once by the formatter and never changed afterwards; the cache
/// keys entries by `chat_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedChat {
    pub chat_id: ChatId,
    pub organization_id: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub status: Option<String>,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub assigned_agent: Option<String>,
    pub department: Option<String>,
    pub message_count: usize,
    pub conversation_text: String,
    pub has_messages: bool,
}

impl ExportedChat {
    /// True when the chat was created at or after `from`.
    pub fn is_created_since(&self, from: &Timestamp) -> bool {
        self.created_at.is_some_and(|created| !created.is_before(from))
    }

    /// Transcript lines as `(tag, text)` pairs.
    pub fn transcript_lines(&self) -> impl Iterator<Item = (&str, &str)> {
        self.conversation_text.lines().filter_map(|line| {
            let rest = line.strip_prefix('[')?;
            let (tag, text) = rest.split_once("] ")?;
            Some((tag, text))
        })
    }
}

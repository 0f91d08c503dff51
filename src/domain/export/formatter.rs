//! Conversation formatter - builds an [`ExportedChat`] from a conversation
//! and its messages.

use super::ExportedChat;
use crate::domain::conversation::{Conversation, Message};

/// Formats a conversation and its messages into an exported chat.
///
/// Messages are ordered by send time (stable; untimed messages first),
/// technical messages are left out of the transcript, and every remaining
/// non-blank body becomes one `[TAG] body` line.
///
/// `message_count` is the length of the full input list, technical messages
/// included, even though the transcript leaves them out.
pub fn format_conversation(conversation: &Conversation, messages: &[Message]) -> ExportedChat {
    let mut chat = ExportedChat {
        chat_id: conversation.id.clone(),
        organization_id: conversation.organization_id.clone(),
        created_at: conversation.created_at,
        updated_at: conversation.updated_at,
        status: conversation.status.clone(),
        customer_email: conversation.customer.email.clone(),
        customer_name: conversation.customer.name.clone(),
        assigned_agent: conversation.assignee.name.clone(),
        department: conversation.department.clone(),
        message_count: 0,
        conversation_text: String::new(),
        has_messages: false,
    };

    if messages.is_empty() {
        return chat;
    }

    let mut ordered: Vec<&Message> = messages.iter().collect();
    ordered.sort_by_key(|m| m.sent_at);

    let mut text = String::new();
    for message in ordered.into_iter().filter(|m| !m.is_technical()) {
        let body = message.body.trim();
        if body.is_empty() {
            continue;
        }
        text.push('[');
        text.push_str(message.author.tag());
        text.push_str("] ");
        text.push_str(body);
        text.push('\n');
    }

    chat.message_count = messages.len();
    chat.conversation_text = text.trim_end().to_string();
    chat.has_messages = true;
    chat
}

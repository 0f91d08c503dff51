//! Export report - the JSON document and the CSV summary derived from it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::categorizer::{categorize, Category};
use super::ExportedChat;
use crate::domain::conversation::Author;
use crate::domain::foundation::Timestamp;

/// Characters kept in the CSV summary column.
pub const SUMMARY_CHARS: usize = 200;

const CSV_HEADER: &str = "Chat ID,Created Date,Status,Customer Name,Customer Email,Assigned Agent,\
Department,Message Count,Category,First Customer Message,Last Agent Message,Summary";

/// Number of exported chats per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Final report written at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutput {
    pub exported_at: Timestamp,
    pub organization_id: Option<String>,
    pub department_filter: Option<String>,
    pub from_date: Timestamp,
    pub total_chats: usize,
    pub chats_with_messages: usize,
    pub category_breakdown: Vec<CategoryCount>,
    pub chats: Vec<ExportedChat>,
}

impl ExportOutput {
    /// Builds the report for `chats`, stamping it with the current time.
    pub fn new(
        organization_id: Option<String>,
        department_filter: Option<String>,
        from_date: Timestamp,
        chats: Vec<ExportedChat>,
    ) -> Self {
        let category_breakdown = Category::all()
            .iter()
            .map(|category| CategoryCount {
                category: *category,
                count: chats
                    .iter()
                    .filter(|chat| categorize(&chat.conversation_text) == *category)
                    .count(),
            })
            .filter(|entry| entry.count > 0)
            .collect();

        Self {
            exported_at: Timestamp::now(),
            organization_id,
            department_filter,
            from_date,
            total_chats: chats.len(),
            chats_with_messages: chats.iter().filter(|chat| chat.has_messages).count(),
            category_breakdown,
            chats,
        }
    }

    /// Renders the CSV summary, header included.
    pub fn to_csv(&self) -> String {
        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        for chat in &self.chats {
            out.push_str(&csv_row(chat));
            out.push('\n');
        }
        out
    }
}

/// Path of the CSV summary next to the JSON report.
pub fn csv_path_for(json_path: &Path) -> PathBuf {
    json_path.with_extension("csv")
}

/// Wraps a value in double quotes, doubling any quotes inside it.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row(chat: &ExportedChat) -> String {
    let first_user = chat
        .transcript_lines()
        .find(|(tag, _)| *tag == Author::User.tag())
        .map(|(_, text)| text)
        .unwrap_or_default();
    let last_agent = chat
        .transcript_lines()
        .filter(|(tag, _)| *tag == Author::Agent.tag())
        .last()
        .map(|(_, text)| text)
        .unwrap_or_default();

    let fields = [
        chat.chat_id.to_string(),
        chat.created_at.map(|t| t.date_string()).unwrap_or_default(),
        quote(chat.status.as_deref().unwrap_or_default()),
        quote(chat.customer_name.as_deref().unwrap_or_default()),
        quote(chat.customer_email.as_deref().unwrap_or_default()),
        quote(chat.assigned_agent.as_deref().unwrap_or_default()),
        quote(chat.department.as_deref().unwrap_or_default()),
        chat.message_count.to_string(),
        quote(categorize(&chat.conversation_text).label()),
        quote(first_user),
        quote(last_agent),
        quote(&summary(chat)),
    ];
    fields.join(",")
}

/// Plain transcript text without tags, newlines folded, first 200 chars.
fn summary(chat: &ExportedChat) -> String {
    let plain = chat
        .conversation_text
        .lines()
        .map(|line| match line.split_once("] ") {
            Some((tag, text)) if tag.starts_with('[') => text,
            _ => line,
        })
        .collect::<Vec<_>>()
        .join(" ");
    plain.chars().take(SUMMARY_CHARS).collect()
}

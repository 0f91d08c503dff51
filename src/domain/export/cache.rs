//! Export cache - the persistent record of chats already exported.
//!
//! The cache is an append-only, id-unique list of [`ExportedChat`] plus the
//! bookkeeping of the last batch checkpoint. It is loaded once per run,
//! appended to after every batch and saved back as a whole.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ExportedChat;
use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ChatId, Timestamp};

/// Identity of the export the cache was built for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMetadata {
    pub organization_id: Option<String>,
    pub department_filter: Option<String>,
}

/// Persistent export cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportCache {
    pub last_updated: Timestamp,
    #[serde(default)]
    pub last_processed_timestamp: Option<Timestamp>,
    #[serde(default)]
    pub last_processed_batch: usize,
    #[serde(default)]
    pub total_batches: usize,
    #[serde(default)]
    chats: Vec<ExportedChat>,
    #[serde(default)]
    pub metadata: CacheMetadata,
}

impl ExportCache {
    /// Creates an empty cache.
    pub fn new(metadata: CacheMetadata) -> Self {
        Self {
            last_updated: Timestamp::now(),
            last_processed_timestamp: None,
            last_processed_batch: 0,
            total_batches: 0,
            chats: Vec::new(),
            metadata,
        }
    }

    /// Cached chats in insertion order.
    pub fn chats(&self) -> &[ExportedChat] {
        &self.chats
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    fn ids(&self) -> HashSet<&ChatId> {
        self.chats.iter().map(|chat| &chat.chat_id).collect()
    }

    /// True if a chat with this id is cached.
    pub fn contains(&self, id: &ChatId) -> bool {
        self.chats.iter().any(|chat| &chat.chat_id == id)
    }

    /// Drops repeated ids, keeping the first occurrence.
    ///
    /// Returns the number of entries removed. Only needed for files edited
    /// outside this tool; [`merge`](Self::merge) never creates duplicates.
    pub fn dedupe(&mut self) -> usize {
        let before = self.chats.len();
        let mut seen = HashSet::new();
        self.chats.retain(|chat| seen.insert(chat.chat_id.clone()));
        before - self.chats.len()
    }

    /// Splits conversations into `(cached, uncached)`, preserving order.
    pub fn partition(&self, conversations: Vec<Conversation>) -> (Vec<Conversation>, Vec<Conversation>) {
        let ids = self.ids();
        conversations
            .into_iter()
            .partition(|conversation| ids.contains(&conversation.id))
    }

    /// Appends chats whose id is not cached yet.
    ///
    /// Returns how many were added. Existing entries are never replaced.
    pub fn merge(&mut self, batch: Vec<ExportedChat>) -> usize {
        let mut ids: HashSet<ChatId> = self.chats.iter().map(|c| c.chat_id.clone()).collect();
        let before = self.chats.len();
        for chat in batch {
            if ids.insert(chat.chat_id.clone()) {
                self.chats.push(chat);
            }
        }
        self.chats.len() - before
    }

    /// Records a completed batch (1-based) and refreshes bookkeeping.
    pub fn record_checkpoint(&mut self, batch: usize, total_batches: usize) {
        self.last_processed_batch = batch;
        self.total_batches = total_batches;
        self.touch();
    }

    /// Refreshes `last_updated` and `last_processed_timestamp`.
    pub fn touch(&mut self) {
        self.last_updated = Timestamp::now();
        self.last_processed_timestamp = self.chats.iter().filter_map(|c| c.created_at).max();
    }

    /// Cached chats created at or after `from`, in cache order.
    pub fn chats_since(&self, from: &Timestamp) -> Vec<ExportedChat> {
        self.chats
            .iter()
            .filter(|chat| chat.is_created_since(from))
            .cloned()
            .collect()
    }
}

//! Immutable settings for one export run.

use std::time::Duration;

use crate::domain::export::CacheMetadata;
use crate::domain::foundation::Timestamp;

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_CONVERSATION_DELAY: Duration = Duration::from_millis(200);
pub const DEFAULT_MAX_MESSAGES: usize = 100;
pub const DEFAULT_SQUID_AGENT_NAME: &str = "Squid";

/// Everything the export handler needs to know about the run.
///
/// The organization id doubles as the department filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub organization_id: Option<String>,
    pub from_date: Timestamp,
    pub page_size: usize,
    pub batch_size: usize,
    pub page_delay: Duration,
    pub conversation_delay: Duration,
    pub max_messages: usize,
    pub squid_agent_name: String,
}

impl ExportSettings {
    /// Creates settings with default sizes and delays.
    pub fn new(from_date: Timestamp) -> Self {
        Self {
            organization_id: None,
            from_date,
            page_size: DEFAULT_PAGE_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
            conversation_delay: DEFAULT_CONVERSATION_DELAY,
            max_messages: DEFAULT_MAX_MESSAGES,
            squid_agent_name: DEFAULT_SQUID_AGENT_NAME.to_string(),
        }
    }

    /// Sets the organization (and with it the department filter).
    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Sets the list page size (at least 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the checkpoint batch size (at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Sets the pauses between list pages and between conversations.
    pub fn with_delays(mut self, page_delay: Duration, conversation_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self.conversation_delay = conversation_delay;
        self
    }

    /// Sets the cap on messages kept per conversation.
    pub fn with_max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages;
        self
    }

    /// Sets the assignee name that maps to the SQUID department.
    pub fn with_squid_agent_name(mut self, name: impl Into<String>) -> Self {
        self.squid_agent_name = name.into();
        self
    }

    /// Department conversations must belong to, if any.
    pub fn department_filter(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    /// Metadata stamped on a fresh cache.
    pub fn cache_metadata(&self) -> CacheMetadata {
        CacheMetadata {
            organization_id: self.organization_id.clone(),
            department_filter: self.department_filter().map(str::to_string),
        }
    }
}

//! Export command handlers.

mod clear_cache;
mod conversation_fetcher;
mod message_fetcher;
mod run_export;
mod settings;

pub use clear_cache::ClearCacheHandler;
pub use conversation_fetcher::{ConversationFetcher, CONVERSATIONS_PATH};
pub use message_fetcher::{extract_messages, MessageEndpoint, MessageFetcher};
pub use run_export::{ExportError, ExportOutcome, ExportRunSummary, RunExportHandler};
pub use settings::{
    ExportSettings, DEFAULT_BATCH_SIZE, DEFAULT_CONVERSATION_DELAY, DEFAULT_MAX_MESSAGES,
    DEFAULT_PAGE_DELAY, DEFAULT_PAGE_SIZE, DEFAULT_SQUID_AGENT_NAME,
};

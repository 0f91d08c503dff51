//! Export module - turning conversations into cached, reportable chats.
//!
//! - [`format_conversation`] builds an [`ExportedChat`] from a conversation
//! - [`DepartmentFilter`] backfills and filters departments
//! - [`categorize`] assigns a report category to a transcript
//! - [`ExportCache`] keeps exported chats unique across runs
//! - [`ExportOutput`] is the final JSON report and its CSV rendering
//! - [`ExportPhase`] tracks where a run is

mod cache;
mod categorizer;
mod department;
mod exported_chat;
mod formatter;
mod phase;
mod report;

pub use cache::{CacheMetadata, ExportCache};
pub use categorizer::{categorize, Category};
pub use department::{DepartmentFilter, DEFAULT_DEPARTMENT, SQUID_DEPARTMENT};
pub use exported_chat::ExportedChat;
pub use formatter::format_conversation;
pub use phase::ExportPhase;
pub use report::{csv_path_for, quote, CategoryCount, ExportOutput, SUMMARY_CHARS};

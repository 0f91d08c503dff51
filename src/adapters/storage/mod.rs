//! Storage Adapters
//!
//! Implementations of the CacheStore and ReportWriter ports.
//!
//! ## Available Adapters
//!
//! - **FileCacheStore** - Stores the export cache as a JSON file
//! - **InMemoryCacheStore** - Stores the cache in memory (testing)
//! - **FileReportWriter** - Writes the JSON report and CSV summary
//! - **InMemoryReportWriter** - Captures reports in memory (testing)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileCacheStore, FileReportWriter};
//!
//! let cache = FileCacheStore::new("./chat_export_cache.json");
//! let reports = FileReportWriter::new("./chat_export.json");
//! ```

mod atomic_file;
mod file_cache_store;
mod file_report_writer;
mod in_memory_cache_store;
mod in_memory_report_writer;

pub use file_cache_store::FileCacheStore;
pub use file_report_writer::FileReportWriter;
pub use in_memory_cache_store::InMemoryCacheStore;
pub use in_memory_report_writer::InMemoryReportWriter;

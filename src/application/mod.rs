//! Application layer - Command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    ClearCacheHandler, ExportError, ExportOutcome, ExportRunSummary, ExportSettings,
    RunExportHandler,
};

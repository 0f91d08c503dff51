//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod export;

pub use export::{
    ClearCacheHandler, ExportError, ExportOutcome, ExportRunSummary, ExportSettings,
    RunExportHandler,
};

//! Report Writer Port - Interface for emitting the final export report.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::export::ExportOutput;

/// Errors from writing reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    SerializationFailed(String),

    #[error("Failed to write {path}: {message}")]
    Io { path: String, message: String },
}

impl ReportError {
    /// Creates an IO error for a path.
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Where the report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLocations {
    pub json: PathBuf,
    pub csv: PathBuf,
}

/// Port for writing the JSON report and its CSV summary.
#[async_trait]
pub trait ReportWriter: Send + Sync {
    /// Writes both report files.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if either file cannot be written.
    async fn write(&self, output: &ExportOutput) -> Result<ReportLocations, ReportError>;
}

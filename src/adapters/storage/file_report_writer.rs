//! File Report Writer - Implementation of ReportWriter.
//!
//! Writes the JSON report to the configured path and the CSV summary next to
//! it, with the extension swapped to `.csv`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::atomic_file::write_atomic;
use crate::domain::export::{csv_path_for, ExportOutput};
use crate::ports::{ReportError, ReportLocations, ReportWriter};

/// Writes reports to the local filesystem.
#[derive(Debug, Clone)]
pub struct FileReportWriter {
    json_path: PathBuf,
}

impl FileReportWriter {
    /// Creates a writer for the given JSON report path.
    pub fn new(json_path: impl Into<PathBuf>) -> Self {
        Self {
            json_path: json_path.into(),
        }
    }

    async fn write_file(path: &Path, content: &[u8]) -> Result<(), ReportError> {
        write_atomic(path, content)
            .await
            .map_err(|e| ReportError::io(path.display().to_string(), e.to_string()))
    }
}

#[async_trait]
impl ReportWriter for FileReportWriter {
    async fn write(&self, output: &ExportOutput) -> Result<ReportLocations, ReportError> {
        let json = serde_json::to_string_pretty(output)
            .map_err(|e| ReportError::SerializationFailed(e.to_string()))?;
        Self::write_file(&self.json_path, json.as_bytes()).await?;

        let csv_path = csv_path_for(&self.json_path);
        Self::write_file(&csv_path, output.to_csv().as_bytes()).await?;

        Ok(ReportLocations {
            json: self.json_path.clone(),
            csv: csv_path,
        })
    }
}

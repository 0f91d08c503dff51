//! In-Memory Report Writer
//!
//! Captures every report instead of writing files. Useful for testing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::export::ExportOutput;
use crate::ports::{ReportError, ReportLocations, ReportWriter};

/// Report writer that keeps outputs in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportWriter {
    outputs: Arc<RwLock<Vec<ExportOutput>>>,
}

impl InMemoryReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports written so far.
    pub async fn outputs(&self) -> Vec<ExportOutput> {
        self.outputs.read().await.clone()
    }

    /// The most recent report.
    pub async fn last(&self) -> Option<ExportOutput> {
        self.outputs.read().await.last().cloned()
    }
}

#[async_trait]
impl ReportWriter for InMemoryReportWriter {
    async fn write(&self, output: &ExportOutput) -> Result<ReportLocations, ReportError> {
        self.outputs.write().await.push(output.clone());
        Ok(ReportLocations {
            json: PathBuf::from("memory.json"),
            csv: PathBuf::from("memory.csv"),
        })
    }
}

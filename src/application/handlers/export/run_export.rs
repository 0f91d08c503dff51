//! RunExportHandler - incremental, resumable export of support conversations.
//!
//! One run walks the phases in [`ExportPhase`]: load the cache, fetch the
//! conversation list, apply the department filter, diff against the cache,
//! process new conversations in checkpointed batches, then write the reports.

use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::conversation_fetcher::ConversationFetcher;
use super::message_fetcher::MessageFetcher;
use super::settings::ExportSettings;
use crate::domain::conversation::{Conversation, Message};
use crate::domain::export::{
    format_conversation, DepartmentFilter, ExportCache, ExportOutput, ExportPhase, ExportedChat,
};
use crate::domain::foundation::{StateMachine, ValidationError};
use crate::ports::{
    ApiTransport, CacheStore, ReportError, ReportLocations, ReportWriter, TransportError,
};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Every matching conversation was already cached.
    NothingNew,
    /// At least one conversation went through batch processing.
    Processed,
}

/// Counts reported at the end of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRunSummary {
    pub outcome: ExportOutcome,
    /// Conversations returned by the list endpoint after the date filter.
    pub fetched: usize,
    /// Conversations left after the department filter.
    pub in_department: usize,
    pub already_cached: usize,
    pub newly_exported: usize,
    pub failed: usize,
    pub batches: usize,
    /// Chats in the written report.
    pub chats_written: usize,
    pub locations: ReportLocations,
}

/// Fatal export errors. The cache keeps whatever was saved before.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to fetch conversations: {0}")]
    Fetch(#[from] TransportError),

    #[error("failed to write report: {0}")]
    Report(#[from] ReportError),

    #[error("invalid export phase transition: {0}")]
    InvalidPhase(ValidationError),
}

#[derive(Debug, Default)]
struct BatchStats {
    exported: usize,
    failed: usize,
    batches: usize,
}

/// Handler for one export run.
pub struct RunExportHandler {
    transport: Arc<dyn ApiTransport>,
    cache_store: Arc<dyn CacheStore>,
    report_writer: Arc<dyn ReportWriter>,
    settings: ExportSettings,
}

impl RunExportHandler {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        cache_store: Arc<dyn CacheStore>,
        report_writer: Arc<dyn ReportWriter>,
        settings: ExportSettings,
    ) -> Self {
        Self {
            transport,
            cache_store,
            report_writer,
            settings,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Runs the export end to end.
    ///
    /// # Errors
    ///
    /// Fails when the conversation list cannot be fetched or the reports
    /// cannot be written. Batches completed before the failure stay cached.
    pub async fn handle(&self) -> Result<ExportRunSummary, ExportError> {
        let mut phase = ExportPhase::Init;
        match self.run(&mut phase).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                error!(phase = ?phase, error = %e, "Export failed");
                if let Ok(failed) = phase.transition_to(ExportPhase::Failed) {
                    debug!(from = ?phase, to = ?failed, "Export phase");
                }
                Err(e)
            }
        }
    }

    async fn run(&self, phase: &mut ExportPhase) -> Result<ExportRunSummary, ExportError> {
        let from = self.settings.from_date;

        advance(phase, ExportPhase::LoadCache)?;
        let mut cache = self.load_cache().await;

        advance(phase, ExportPhase::Fetch)?;
        let fetcher = ConversationFetcher::new(
            self.transport.clone(),
            self.settings.page_size,
            self.settings.page_delay,
        );
        let fetched = fetcher.fetch(&from).await?;
        let fetched_count = fetched.len();
        info!(count = fetched_count, from = %from.date_string(), "Fetched conversations");

        advance(phase, ExportPhase::DepartmentFilter)?;
        let filter = DepartmentFilter::new(
            self.settings.department_filter().map(str::to_string),
            self.settings.squid_agent_name.clone(),
        );
        let in_department = filter.apply(fetched);
        let in_department_count = in_department.len();
        if let Some(department) = filter.department() {
            info!(department, kept = in_department_count, "Applied department filter");
        }

        advance(phase, ExportPhase::DiffAgainstCache)?;
        let (cached, uncached) = cache.partition(in_department);
        info!(cached = cached.len(), new = uncached.len(), "Compared with cache");

        let (outcome, stats) = if uncached.is_empty() {
            advance(phase, ExportPhase::NothingNew)?;
            info!("No new conversations to process");
            (ExportOutcome::NothingNew, BatchStats::default())
        } else {
            advance(phase, ExportPhase::BatchProcess)?;
            let stats = self.process_batches(&mut cache, uncached).await;
            (ExportOutcome::Processed, stats)
        };

        advance(phase, ExportPhase::WriteOutputs)?;
        cache.touch();
        self.checkpoint(&cache).await;

        let output = ExportOutput::new(
            self.settings.organization_id.clone(),
            self.settings.department_filter().map(str::to_string),
            from,
            cache.chats_since(&from),
        );
        let chats_written = output.total_chats;
        let locations = self.report_writer.write(&output).await?;
        info!(
            chats = chats_written,
            with_messages = output.chats_with_messages,
            json = %locations.json.display(),
            csv = %locations.csv.display(),
            "Wrote export"
        );

        advance(phase, ExportPhase::Done)?;

        Ok(ExportRunSummary {
            outcome,
            fetched: fetched_count,
            in_department: in_department_count,
            already_cached: cached.len(),
            newly_exported: stats.exported,
            failed: stats.failed,
            batches: stats.batches,
            chats_written,
            locations,
        })
    }

    /// Loads the cache, starting fresh when it is missing or unreadable.
    async fn load_cache(&self) -> ExportCache {
        let fresh = || ExportCache::new(self.settings.cache_metadata());

        let mut cache = match self.cache_store.load().await {
            Ok(Some(cache)) => cache,
            Ok(None) => {
                info!(location = %self.cache_store.location(), "No cache found, starting fresh");
                return fresh();
            }
            Err(e) => {
                warn!(error = %e, "Failed to load cache, starting fresh");
                return fresh();
            }
        };

        let removed = cache.dedupe();
        if removed > 0 {
            warn!(removed, "Removed duplicate chats from cache");
        }
        if cache.metadata.organization_id != self.settings.organization_id {
            warn!(
                cached = ?cache.metadata.organization_id,
                configured = ?self.settings.organization_id,
                "Cache was built for a different organization"
            );
        }
        info!(
            chats = cache.len(),
            last_batch = cache.last_processed_batch,
            total_batches = cache.total_batches,
            "Loaded cache"
        );
        cache
    }

    async fn process_batches(&self, cache: &mut ExportCache, uncached: Vec<Conversation>) -> BatchStats {
        let messages = MessageFetcher::new(self.transport.clone(), self.settings.max_messages);
        let batch_size = self.settings.batch_size.max(1);
        let total_batches = uncached.len().div_ceil(batch_size);
        let mut stats = BatchStats::default();

        for (index, batch) in uncached.chunks(batch_size).enumerate() {
            let batch_no = index + 1;
            info!(batch = batch_no, total = total_batches, size = batch.len(), "Processing batch");

            let mut exported = Vec::with_capacity(batch.len());
            for (position, conversation) in batch.iter().enumerate() {
                match self.export_conversation(&messages, conversation).await {
                    Ok(chat) => exported.push(chat),
                    Err(e) => {
                        stats.failed += 1;
                        warn!(chat_id = %conversation.id, error = %e, "Skipping conversation");
                    }
                }

                let last = batch_no == total_batches && position + 1 == batch.len();
                if !last && !self.settings.conversation_delay.is_zero() {
                    sleep(self.settings.conversation_delay).await;
                }
            }

            stats.exported += cache.merge(exported);
            cache.record_checkpoint(batch_no, total_batches);
            self.checkpoint(cache).await;
            stats.batches += 1;
        }

        info!(exported = stats.exported, failed = stats.failed, "Finished batches");
        stats
    }

    async fn export_conversation(
        &self,
        messages: &MessageFetcher,
        conversation: &Conversation,
    ) -> Result<ExportedChat, ValidationError> {
        let raw = if conversation.inline_messages.is_empty() {
            messages.fetch(&conversation.id).await
        } else {
            conversation.inline_messages.clone()
        };
        let normalized = Message::from_json_list(&raw)?;
        debug!(chat_id = %conversation.id, messages = normalized.len(), "Formatting conversation");
        Ok(format_conversation(conversation, &normalized))
    }

    /// Saves the cache. Failures are logged and the run continues.
    async fn checkpoint(&self, cache: &ExportCache) {
        match self.cache_store.save(cache).await {
            Ok(()) => debug!(chats = cache.len(), "Saved cache"),
            Err(e) => warn!(error = %e, "Failed to save cache, continuing"),
        }
    }
}

fn advance(phase: &mut ExportPhase, next: ExportPhase) -> Result<(), ExportError> {
    let from = *phase;
    *phase = phase.transition_to(next).map_err(ExportError::InvalidPhase)?;
    debug!(from = ?from, to = ?next, "Export phase");
    Ok(())
}

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chat_export::adapters::{FileCacheStore, FileReportWriter, ReqwestTransport, ReqwestTransportConfig};
use chat_export::application::{ClearCacheHandler, ExportOutcome, RunExportHandler};
use chat_export::cli::Cli;
use chat_export::config::{AppConfig, LoggingConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // ── 1. Arguments and configuration ─────────────────────────────────────────
    let cli = Cli::parse();

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut config);

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    init_tracing(&config.logging);
    info!(version = env!("CARGO_PKG_VERSION"), "chat-export starting");

    let cache_store = Arc::new(FileCacheStore::new(&config.export.cache_path));

    // ── 3. Clear cache and exit ────────────────────────────────────────────────
    if cli.clear_cache {
        return match ClearCacheHandler::new(cache_store).handle().await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "Failed to clear cache");
                ExitCode::FAILURE
            }
        };
    }

    // ── 4. Export ──────────────────────────────────────────────────────────────
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    let settings = match config.export.settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let (Some(api_key), Some(base_url)) = (config.api.api_key.clone(), config.api.base_url.clone())
    else {
        error!("API key and base URL are required");
        return ExitCode::FAILURE;
    };
    let transport_config =
        ReqwestTransportConfig::new(api_key, base_url).with_timeout(config.api.timeout());
    let transport = match ReqwestTransport::new(transport_config) {
        Ok(transport) => Arc::new(transport),
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let report_writer = Arc::new(FileReportWriter::new(&config.export.output_path));
    let handler = RunExportHandler::new(transport, cache_store, report_writer, settings);

    match handler.handle().await {
        Ok(summary) => {
            if summary.outcome == ExportOutcome::NothingNew {
                info!("Nothing new since the last run");
            }
            info!(
                fetched = summary.fetched,
                in_department = summary.in_department,
                already_cached = summary.already_cached,
                newly_exported = summary.newly_exported,
                failed = summary.failed,
                chats_written = summary.chats_written,
                json = %summary.locations.json.display(),
                csv = %summary.locations.csv.display(),
                "Export complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Export aborted");
            error!(
                cache = %config.export.cache_path.display(),
                "Progress so far is kept in the cache; run again to resume"
            );
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over the configured level; an invalid level falls back to `info`.
fn init_tracing(logging: &LoggingConfig) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match logging.level.parse::<EnvFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!(
                    "WARN: log level '{}' is not a valid tracing filter ({}); falling back to 'info'",
                    logging.level, e
                );
                EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    if logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

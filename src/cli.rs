//! Command-line interface.
//!
//! Flags override the matching `CHAT_EXPORT__EXPORT__*` settings.

use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

/// Export support conversations to JSON and CSV, resuming from a local cache.
#[derive(Debug, Parser)]
#[command(name = "chat-export", version, about)]
pub struct Cli {
    /// Delete the cache file and exit
    #[arg(long)]
    pub clear_cache: bool,

    /// Only export conversations created on or after this date
    #[arg(long, value_name = "DATE")]
    pub from_date: Option<String>,

    /// JSON report path; the CSV summary is written next to it
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Cache file path
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,
}

impl Cli {
    /// Apply flag overrides on top of loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(from_date) = &self.from_date {
            config.export.from_date = from_date.clone();
        }
        if let Some(output) = &self.output {
            config.export.output_path = output.clone();
        }
        if let Some(cache) = &self.cache {
            config.export.cache_path = cache.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_export_with_config_values() {
        let cli = Cli::try_parse_from(["chat-export"]).unwrap();
        assert!(!cli.clear_cache);

        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.export.from_date, "2024-01-01");
        assert_eq!(config.export.output_path, PathBuf::from("chat_export.json"));
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "chat-export",
            "--from-date",
            "2024-05-01",
            "--output",
            "reports/may.json",
            "--cache",
            "state/cache.json",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.export.from_date, "2024-05-01");
        assert_eq!(config.export.output_path, PathBuf::from("reports/may.json"));
        assert_eq!(config.export.cache_path, PathBuf::from("state/cache.json"));
    }

    #[test]
    fn clear_cache_flag_parses() {
        let cli = Cli::try_parse_from(["chat-export", "--clear-cache"]).unwrap();
        assert!(cli.clear_cache);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["chat-export", "--bogus"]).is_err());
    }
}

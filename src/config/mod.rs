//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHAT_EXPORT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use chat_export::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Writing to {}", config.export.output_path.display());
//! ```

mod api;
mod error;
mod export;
mod logging;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use export::{ExportConfig, MAX_PAGE_SIZE};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Support API connection (key, base URL, timeout)
    #[serde(default)]
    pub api: ApiConfig,

    /// Export run settings (organization, dates, paths, pacing)
    #[serde(default)]
    pub export: ExportConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `CHAT_EXPORT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHAT_EXPORT__API__API_KEY=...` -> `api.api_key = ...`
    /// - `CHAT_EXPORT__EXPORT__ORGANIZATION_ID=SQUID` -> `export.organization_id = SQUID`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHAT_EXPORT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate everything an export run needs
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("CHAT_EXPORT__API__API_KEY", "test-key");
        env::set_var("CHAT_EXPORT__API__BASE_URL", "https://api.example.com/v1");
    }

    fn clear_env() {
        env::remove_var("CHAT_EXPORT__API__API_KEY");
        env::remove_var("CHAT_EXPORT__API__BASE_URL");
        env::remove_var("CHAT_EXPORT__EXPORT__ORGANIZATION_ID");
        env::remove_var("CHAT_EXPORT__EXPORT__BATCH_SIZE");
        env::remove_var("CHAT_EXPORT__EXPORT__OUTPUT_PATH");
        env::remove_var("CHAT_EXPORT__LOGGING__JSON");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.api.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.api.base_url.as_deref(), Some("https://api.example.com/v1"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_values_override_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CHAT_EXPORT__EXPORT__ORGANIZATION_ID", "SQUID");
        env::set_var("CHAT_EXPORT__EXPORT__BATCH_SIZE", "25");
        env::set_var("CHAT_EXPORT__EXPORT__OUTPUT_PATH", "out/report.json");
        env::set_var("CHAT_EXPORT__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.export.organization_id.as_deref(), Some("SQUID"));
        assert_eq!(config.export.batch_size, 25);
        assert_eq!(config.export.output_path, PathBuf::from("out/report.json"));
        assert!(config.logging.json);
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.export.page_size, 100);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.validate().unwrap_err(),
            ValidationError::MissingRequired("API__API_KEY")
        );
    }
}

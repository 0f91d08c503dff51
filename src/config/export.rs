//! Export run configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::handlers::export::{
    ExportSettings, DEFAULT_BATCH_SIZE, DEFAULT_MAX_MESSAGES, DEFAULT_PAGE_SIZE,
    DEFAULT_SQUID_AGENT_NAME,
};
use crate::domain::foundation::Timestamp;

/// Largest page the list endpoint serves.
pub const MAX_PAGE_SIZE: usize = 100;

/// What to export and where to put it
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Organization to export; also used as the department filter
    pub organization_id: Option<String>,

    /// Earliest creation date to include (`YYYY-MM-DD` or RFC 3339)
    #[serde(default = "default_from_date")]
    pub from_date: String,

    /// JSON report path; the CSV summary is written next to it
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Cache file path
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Conversations processed between cache checkpoints
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between list pages, in milliseconds
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Pause between conversations, in milliseconds
    #[serde(default = "default_conversation_delay_ms")]
    pub conversation_delay_ms: u64,

    /// Cap on messages kept per conversation
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    /// Assignee name whose conversations belong to the SQUID department
    #[serde(default = "default_squid_agent_name")]
    pub squid_agent_name: String,
}

impl ExportConfig {
    /// Parse the configured from date
    pub fn from_timestamp(&self) -> Result<Timestamp, ValidationError> {
        Timestamp::parse_str(&self.from_date)
            .ok_or_else(|| ValidationError::InvalidFromDate(self.from_date.clone()))
    }

    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.from_timestamp()?;

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidPageSize { max: MAX_PAGE_SIZE });
        }
        if self.batch_size == 0 {
            return Err(ValidationError::InvalidBatchSize);
        }
        if self.max_messages == 0 {
            return Err(ValidationError::InvalidMaxMessages);
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("EXPORT__OUTPUT_PATH"));
        }
        if self.cache_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("EXPORT__CACHE_PATH"));
        }

        Ok(())
    }

    /// Build run settings for the export handler
    pub fn settings(&self) -> Result<ExportSettings, ValidationError> {
        let mut settings = ExportSettings::new(self.from_timestamp()?)
            .with_page_size(self.page_size)
            .with_batch_size(self.batch_size)
            .with_delays(
                Duration::from_millis(self.page_delay_ms),
                Duration::from_millis(self.conversation_delay_ms),
            )
            .with_max_messages(self.max_messages)
            .with_squid_agent_name(self.squid_agent_name.clone());

        if let Some(organization_id) = self.organization_id.as_deref().filter(|id| !id.is_empty()) {
            settings = settings.with_organization(organization_id);
        }

        Ok(settings)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            organization_id: None,
            from_date: default_from_date(),
            output_path: default_output_path(),
            cache_path: default_cache_path(),
            page_size: default_page_size(),
            batch_size: default_batch_size(),
            page_delay_ms: default_page_delay_ms(),
            conversation_delay_ms: default_conversation_delay_ms(),
            max_messages: default_max_messages(),
            squid_agent_name: default_squid_agent_name(),
        }
    }
}

fn default_from_date() -> String {
    "2024-01-01".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("chat_export.json")
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("chat_export_cache.json")
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_page_delay_ms() -> u64 {
    100
}

fn default_conversation_delay_ms() -> u64 {
    200
}

fn default_max_messages() -> usize {
    DEFAULT_MAX_MESSAGES
}

fn default_squid_agent_name() -> String {
    DEFAULT_SQUID_AGENT_NAME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_config_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.from_date, "2024-01-01");
        assert_eq!(config.output_path, PathBuf::from("chat_export.json"));
        assert_eq!(config.cache_path, PathBuf::from("chat_export_cache.json"));
        assert_eq!(config.batch_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_settings_carry_configured_values() {
        let config = ExportConfig {
            organization_id: Some("SQUID".to_string()),
            batch_size: 5,
            page_delay_ms: 0,
            conversation_delay_ms: 0,
            ..Default::default()
        };

        let settings = config.settings().unwrap();

        assert_eq!(settings.department_filter(), Some("SQUID"));
        assert_eq!(settings.batch_size, 5);
        assert!(settings.page_delay.is_zero());
        assert_eq!(settings.from_date.date_string(), "2024-01-01");
    }

    #[test]
    fn test_blank_organization_means_no_filter() {
        let config = ExportConfig {
            organization_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.settings().unwrap().department_filter(), None);
    }

    #[test]
    fn test_bad_from_date_fails() {
        let config = ExportConfig {
            from_date: "last tuesday".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidFromDate("last tuesday".to_string()))
        );
    }

    #[test]
    fn test_page_size_is_bounded() {
        let config = ExportConfig {
            page_size: 101,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidPageSize { max: 100 })
        );
    }

    #[test]
    fn test_zero_batch_size_fails() {
        let config = ExportConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBatchSize));
    }
}

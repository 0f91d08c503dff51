//! Support API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Support API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Bearer token for the support API
    pub api_key: Option<String>,

    /// API root, e.g. `https://api.example.com/v1`
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("API__API_KEY"));
        }

        match self.base_url.as_deref().map(str::trim) {
            None | Some("") => return Err(ValidationError::MissingRequired("API__BASE_URL")),
            Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                return Err(ValidationError::InvalidBaseUrl);
            }
            _ => {}
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

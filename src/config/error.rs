//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("API base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid from date: {0}")]
    InvalidFromDate(String),

    #[error("Page size must be between 1 and {max}")]
    InvalidPageSize { max: usize },

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,

    #[error("Message limit must be at least 1")]
    InvalidMaxMessages,

    #[error("Path must not be empty: {0}")]
    EmptyPath(&'static str),

    #[error("Log level must not be empty")]
    EmptyLogLevel,
}

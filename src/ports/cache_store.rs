//! Cache Store Port - Interface for persisting the export cache.

use async_trait::async_trait;

use crate::domain::export::ExportCache;

/// Errors that can occur during cache storage operations
#[derive(Debug, thiserror::Error)]
pub enum CacheStoreError {
    #[error("Failed to serialize cache: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize cache: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for loading and saving the export cache
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Load the cache
    ///
    /// # Returns
    /// `None` when no cache has been saved yet
    ///
    /// # Errors
    /// Returns `CacheStoreError` if the stored cache cannot be read or parsed
    async fn load(&self) -> Result<Option<ExportCache>, CacheStoreError>;

    /// Save the cache, replacing any previous copy
    ///
    /// # Errors
    /// Returns `CacheStoreError` if save fails
    async fn save(&self, cache: &ExportCache) -> Result<(), CacheStoreError>;

    /// Delete the stored cache
    ///
    /// # Returns
    /// `true` if a cache existed and was removed
    async fn clear(&self) -> Result<bool, CacheStoreError>;

    /// Human-readable location, used in log lines
    fn location(&self) -> String;
}

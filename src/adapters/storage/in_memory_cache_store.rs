//! In-Memory Cache Store Adapter
//!
//! Holds the export cache in memory and keeps a snapshot of every save.
//! Useful for testing checkpoint behavior.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::export::ExportCache;
use crate::ports::{CacheStore, CacheStoreError};

/// In-memory storage for the export cache
#[derive(Debug, Clone, Default)]
pub struct InMemoryCacheStore {
    current: Arc<RwLock<Option<ExportCache>>>,
    snapshots: Arc<RwLock<Vec<ExportCache>>>,
    fail_load: bool,
    fail_save: bool,
}

impl InMemoryCacheStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `cache`
    pub fn with_cache(cache: ExportCache) -> Self {
        Self {
            current: Arc::new(RwLock::new(Some(cache))),
            ..Self::default()
        }
    }

    /// Make every load fail as if the stored cache were corrupt
    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    /// Make every save fail
    pub fn failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    /// The most recently saved cache
    pub async fn current(&self) -> Option<ExportCache> {
        self.current.read().await.clone()
    }

    /// Every cache passed to `save`, in order
    pub async fn snapshots(&self) -> Vec<ExportCache> {
        self.snapshots.read().await.clone()
    }

    /// Number of successful saves
    pub async fn save_count(&self) -> usize {
        self.snapshots.read().await.len()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn load(&self) -> Result<Option<ExportCache>, CacheStoreError> {
        if self.fail_load {
            return Err(CacheStoreError::DeserializationFailed(
                "simulated corrupt cache".to_string(),
            ));
        }
        Ok(self.current.read().await.clone())
    }

    async fn save(&self, cache: &ExportCache) -> Result<(), CacheStoreError> {
        if self.fail_save {
            return Err(CacheStoreError::IoError("simulated save failure".to_string()));
        }
        *self.current.write().await = Some(cache.clone());
        self.snapshots.write().await.push(cache.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<bool, CacheStoreError> {
        Ok(self.current.write().await.take().is_some())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::export::CacheMetadata;

    #[tokio::test]
    async fn save_then_load_returns_cache() {
        let store = InMemoryCacheStore::new();
        let cache = ExportCache::new(CacheMetadata::default());

        store.save(&cache).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(cache));
        assert_eq!(store.save_count().await, 1);
    }

    #[tokio::test]
    async fn failure_switches_are_honored() {
        let store = InMemoryCacheStore::new().failing_load().failing_save();
        let cache = ExportCache::new(CacheMetadata::default());

        assert!(store.load().await.is_err());
        assert!(store.save(&cache).await.is_err());
        assert_eq!(store.save_count().await, 0);
    }

    #[tokio::test]
    async fn clear_reports_whether_anything_was_removed() {
        let store = InMemoryCacheStore::with_cache(ExportCache::new(CacheMetadata::default()));

        assert!(store.clear().await.unwrap());
        assert!(!store.clear().await.unwrap());
        assert!(store.current().await.is_none());
    }
}

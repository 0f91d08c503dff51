//! ClearCacheHandler - removes the persisted export cache.

use std::sync::Arc;
use tracing::info;

use crate::ports::{CacheStore, CacheStoreError};

/// Handler for `--clear-cache`.
pub struct ClearCacheHandler {
    cache_store: Arc<dyn CacheStore>,
}

impl ClearCacheHandler {
    pub fn new(cache_store: Arc<dyn CacheStore>) -> Self {
        Self { cache_store }
    }

    /// Deletes the cache. Returns whether anything was removed.
    pub async fn handle(&self) -> Result<bool, CacheStoreError> {
        let removed = self.cache_store.clear().await?;
        let location = self.cache_store.location();
        if removed {
            info!(location = %location, "Cache cleared");
        } else {
            info!(location = %location, "No cache to clear");
        }
        Ok(removed)
    }
}

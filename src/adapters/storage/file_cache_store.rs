//! File-based Cache Store Adapter
//!
//! Keeps the export cache as one pretty-printed JSON document. Saves replace
//! the whole file atomically.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::atomic_file::write_atomic;
use crate::domain::export::ExportCache;
use crate::ports::{CacheStore, CacheStoreError};

/// File-based storage for the export cache
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    path: PathBuf,
}

impl FileCacheStore {
    /// Create a new file cache store
    ///
    /// # Arguments
    /// * `path` - The cache file location
    ///
    /// # Example
    /// ```ignore
    /// let store = FileCacheStore::new("./chat_export_cache.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The cache file location
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn load(&self) -> Result<Option<ExportCache>, CacheStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CacheStoreError::IoError(e.to_string()))?;

        let cache = serde_json::from_str(&json)
            .map_err(|e| CacheStoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(cache))
    }

    async fn save(&self, cache: &ExportCache) -> Result<(), CacheStoreError> {
        let json = serde_json::to_string_pretty(cache)
            .map_err(|e| CacheStoreError::SerializationFailed(e.to_string()))?;

        write_atomic(&self.path, json.as_bytes())
            .await
            .map_err(|e| CacheStoreError::IoError(format!("{}: {}", self.path.display(), e)))
    }

    async fn clear(&self) -> Result<bool, CacheStoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheStoreError::IoError(e.to_string())),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

//! Atomic file replacement.
//!
//! Uses a write-to-temp-then-rename pattern:
//! 1. Write content to `{path}.tmp`
//! 2. Sync to disk
//! 3. Rename over `{path}`
//!
//! A crash mid-write leaves the previous file intact.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Returns the temporary file path used while replacing `path`.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Replaces `path` with `content`, creating parent directories as needed.
pub(crate) async fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let temp = temp_path(path);
    let mut file = fs::File::create(&temp).await?;
    file.write_all(content).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&temp, path).await
}

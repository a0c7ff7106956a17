// # File State Store
//
// File-based implementation of StateStore.
//
// ## Purpose
//
// Keeps the last IP sent to the provider between runs, so an unchanged
// address costs no provider call.
//
// ## File Format
//
// Plain text, the address on the first line, no trailing newline on write:
//
// ```text
// 203.0.113.5
// ```
//
// On read, blank lines are skipped and surrounding spaces are dropped.
//
// ## Crash Safety
//
// Writes go to `<file>.tmp` first and are renamed over the state file, so a
// crash mid-write leaves either the old or the new address, never a torn one.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::Error;
use crate::traits::state_store::StateStore;

/// Permission bits for the state file (owner read/write, world read)
#[cfg(unix)]
const STATE_FILE_MODE: u32 = 0o644;

/// File-based last-IP store
///
/// # Example
///
/// ```rust,no_run
/// use dynupdate_core::state::FileStateStore;
/// use dynupdate_core::traits::StateStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileStateStore::new("last-ip.txt").await?;
///
///     store.write_last("203.0.113.5").await?;
///     assert_eq!(store.read_last().await?, "203.0.113.5");
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Open a file state store
    ///
    /// The file itself is not touched; missing parent directories are created.
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::config(format!(
                    "Failed to create state directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        Ok(Self { path })
    }

    /// Path of the state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get path to temporary file for atomic writes
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_temp(&self, temp_path: &Path, ip: &str) -> Result<(), Error> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(STATE_FILE_MODE);

        let mut file = options.open(temp_path).await.map_err(|e| {
            Error::store_write(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(ip.as_bytes()).await.map_err(|e| {
            Error::store_write(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            Error::store_write(format!(
                "Failed to flush temp file {}: {}",
                temp_path.display(),
                e
            ))
        })
    }
}

/// First line that is non-empty once spaces are trimmed, or ""
fn first_address_line(content: &str) -> String {
    content
        .lines()
        .map(|line| line.trim_matches(' '))
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn read_last(&self) -> Result<String, Error> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::store_read(format!("{} does not exist", self.path.display()))
            } else {
                Error::store_read(format!(
                    "Failed to read state file {}: {}",
                    self.path.display(),
                    e
                ))
            }
        })?;

        Ok(first_address_line(&content))
    }

    async fn write_last(&self, ip: &str) -> Result<(), Error> {
        let temp_path = self.temp_path();
        if let Err(e) = self.write_temp(&temp_path, ip).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        // Atomic rename (temp -> actual)
        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::store_write(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!("State written to file: {}", self.path.display());
        Ok(())
    }
}

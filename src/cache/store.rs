//! Persisted dependency fingerprint cache
//!
//! Stores the fingerprint of the last successful install under the
//! project's private `.podsync` directory. Absence or corruption reads as
//! "no cache": the cache is an optimization, never a correctness input.

use crate::cache::fingerprint::DependencyFingerprint;
use crate::error::{PodsyncError, PodsyncResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Directory name for podsync's private per-project state
pub const CACHE_DIR_NAME: &str = ".podsync";

/// File the last-known fingerprint is stored in
pub const CACHE_FILE_NAME: &str = "cached-packages.json";

/// Reads and writes the per-project fingerprint cache record
#[derive(Debug, Clone)]
pub struct ChecksumStore {
    cache_dir: PathBuf,
}

impl ChecksumStore {
    /// Create a store over an explicit cache directory
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Create a store over the project's default `.podsync` directory
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(CACHE_DIR_NAME))
    }

    /// Path of the cache record file
    pub fn file_path(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE_NAME)
    }

    /// Load the last recorded fingerprint.
    ///
    /// Returns `None` when the file is missing or unreadable. A corrupt
    /// record is logged and treated as no cache rather than an error.
    pub async fn read(&self) -> Option<DependencyFingerprint> {
        let path = self.file_path();
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                debug!("No cache record at {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(
                    "Discarding unparsable cache record {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Record a fingerprint, replacing any previous record.
    ///
    /// The record is written to a temporary file in the cache directory and
    /// renamed into place, so readers never observe a partial write. Creates
    /// the cache directory if missing.
    pub async fn write(&self, record: &DependencyFingerprint) -> PodsyncResult<()> {
        fs::create_dir_all(&self.cache_dir).await.map_err(|e| {
            PodsyncError::io(
                format!("creating cache directory {}", self.cache_dir.display()),
                e,
            )
        })?;

        let path = self.file_path();
        let tmp = self.cache_dir.join(format!("{}.tmp", CACHE_FILE_NAME));
        let content = serde_json::to_string_pretty(record)?;

        fs::write(&tmp, content)
            .await
            .map_err(|e| PodsyncError::io(format!("writing cache record {}", tmp.display()), e))?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            PodsyncError::io(format!("replacing cache record {}", path.display()), e)
        })?;

        debug!("Recorded dependency fingerprint at {}", path.display());
        Ok(())
    }

    /// Delete the cache record. A missing record is not an error.
    pub async fn invalidate(&self) -> PodsyncResult<()> {
        let path = self.file_path();
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Invalidated cache record {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PodsyncError::io(
                format!("removing cache record {}", path.display()),
                e,
            )),
        }
    }
}

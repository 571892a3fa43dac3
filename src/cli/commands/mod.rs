//! CLI command implementations

pub mod cache;
pub mod init;
pub mod status;
pub mod sync;

pub use cache::execute as cache;
pub use init::execute as init;
pub use status::execute as status;
pub use sync::execute as sync;

use crate::error::{PodsyncError, PodsyncResult};
use std::path::{Path, PathBuf};

/// Resolve the project root from an optional `--project` flag, falling
/// back to the current directory
pub(crate) fn resolve_project_root(flag: Option<PathBuf>) -> PodsyncResult<PathBuf> {
    match flag {
        Some(path) => path.canonicalize().map_err(|e| {
            PodsyncError::io(format!("resolving project path {}", path.display()), e)
        }),
        None => std::env::current_dir()
            .map_err(|e| PodsyncError::io("getting current directory", e)),
    }
}

/// Local timestamp of a file's last modification, for display
pub(crate) fn file_modified(path: &Path) -> Option<String> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let stamp: chrono::DateTime<chrono::Local> = modified.into();
    Some(stamp.format("%Y-%m-%d %H:%M").to_string())
}

//! Dependency manifest reading
//!
//! Supplies the `{name: version-range}` maps the fingerprint is computed
//! over. Only the two package.json dependency sections are read; the rest
//! of the manifest is ignored and the file is never written.

use crate::cache::DependencyFingerprint;
use crate::error::{PodsyncError, PodsyncResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File the dependency lists are declared in
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// The runtime and dev dependency maps declared by a project
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencyManifest {
    /// `dependencies` section
    #[serde(default)]
    pub dependencies: HashMap<String, String>,

    /// `devDependencies` section
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: HashMap<String, String>,
}

impl DependencyManifest {
    /// Read the manifest at the project root
    pub async fn read(project_root: &Path) -> PodsyncResult<Self> {
        let path = manifest_path(project_root);
        let content =
            fs::read_to_string(&path)
                .await
                .map_err(|e| PodsyncError::ManifestRead {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

        serde_json::from_str(&content).map_err(|e| PodsyncError::ManifestRead {
            path,
            reason: e.to_string(),
        })
    }

    /// Compute the dependency fingerprint for this manifest
    pub fn fingerprint(&self) -> DependencyFingerprint {
        DependencyFingerprint::compute(&self.dependencies, &self.dev_dependencies)
    }
}

/// Path of the dependency manifest for a project
pub fn manifest_path(project_root: &Path) -> PathBuf {
    project_root.join(MANIFEST_FILE_NAME)
}

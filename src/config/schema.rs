//! Configuration schema
//!
//! Global configuration lives at `~/.config/podsync/config.toml`; a
//! project can override individual fields with a `.podsync.toml` next to
//! (or above) its package.json.

use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project layout settings
    pub project: ProjectConfig,

    /// Installer invocation settings
    pub installer: InstallerConfig,
}

/// Project layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Native subproject directory, relative to the project root
    pub native_dir: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            native_dir: "ios".to_string(),
        }
    }
}

/// Installer invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// CocoaPods CLI binary name or path
    pub binary: String,

    /// Obtain the CLI via `gem install cocoapods` when it is missing
    pub bootstrap: bool,

    /// Warn when the CLI is older than this. Empty string disables the
    /// check.
    pub min_version: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            binary: "pod".to_string(),
            bootstrap: true,
            min_version: "1.10.0".to_string(),
        }
    }
}

impl InstallerConfig {
    /// Parsed minimum version, if one is configured and well-formed
    pub fn minimum_version(&self) -> Option<Version> {
        let raw = self.min_version.trim();
        if raw.is_empty() {
            return None;
        }
        match Version::parse(raw) {
            Ok(version) => Some(version),
            Err(_) => {
                warn!("ignoring unparseable installer.min_version {raw:?}");
                None
            }
        }
    }
}

/// Fields set by a project-local config file. Only the fields actually
/// present override the global configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigOverlay {
    project: ProjectOverlay,
    installer: InstallerOverlay,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectOverlay {
    native_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InstallerOverlay {
    binary: Option<String>,
    bootstrap: Option<bool>,
    min_version: Option<String>,
}

impl ConfigOverlay {
    /// Overwrite `config` with every field this overlay sets
    pub fn apply(self, config: &mut Config) {
        if let Some(native_dir) = self.project.native_dir {
            config.project.native_dir = native_dir;
        }
        if let Some(binary) = self.installer.binary {
            config.installer.binary = binary;
        }
        if let Some(bootstrap) = self.installer.bootstrap {
            config.installer.bootstrap = bootstrap;
        }
        if let Some(min_version) = self.installer.min_version {
            config.installer.min_version = min_version;
        }
    }
}

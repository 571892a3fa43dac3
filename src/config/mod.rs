//! Configuration management

pub mod schema;

pub use schema::Config;

use crate::error::{PodsyncError, PodsyncResult};
use schema::ConfigOverlay;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Project-local override file, discovered upward from the working
/// directory
pub const LOCAL_CONFIG_FILE: &str = ".podsync.toml";

/// Loads and merges global and project-local configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a config manager with the default global path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom global path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Default global config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("podsync")
            .join("config.toml")
    }

    /// Walk upward from `start` looking for a project-local config file
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        let mut dir = Some(start);
        while let Some(current) = dir {
            let candidate = current.join(LOCAL_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            dir = current.parent();
        }
        None
    }

    /// Load the global configuration, falling back to defaults when the
    /// file does not exist
    pub async fn load(&self) -> PodsyncResult<Config> {
        if !self.config_path.exists() {
            debug!("config file not found, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| {
                PodsyncError::io(
                    format!("reading config from {}", self.config_path.display()),
                    e,
                )
            })?;

        toml::from_str(&content).map_err(|e| PodsyncError::ConfigInvalid {
            path: self.config_path.clone(),
            reason: e.to_string(),
        })
    }

    /// Load the global configuration and apply a project-local overlay on
    /// top, when one was found
    pub async fn load_merged(&self, local: Option<&Path>) -> PodsyncResult<Config> {
        let mut config = self.load().await?;

        if let Some(path) = local {
            let content = fs::read_to_string(path)
                .await
                .map_err(|e| PodsyncError::io(format!("reading config from {}", path.display()), e))?;

            let overlay: ConfigOverlay =
                toml::from_str(&content).map_err(|e| PodsyncError::ConfigInvalid {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;

            overlay.apply(&mut config);
            debug!("applied local config from {}", path.display());
        }

        Ok(config)
    }

    /// Global config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

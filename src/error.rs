//! Error types for podsync
//!
//! All modules use `PodsyncResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for podsync operations
pub type PodsyncResult<T> = Result<T, PodsyncError>;

/// All errors that can occur in podsync
#[derive(Error, Debug)]
pub enum PodsyncError {
    // Installer errors
    #[error("Could not obtain the CocoaPods CLI: {reason}")]
    BootstrapFailed { reason: String },

    #[error("`pod install` failed:\n{diagnostics}")]
    InstallFailed { diagnostics: String },

    #[error("Install cancelled")]
    Cancelled,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Project errors
    #[error("Failed to read dependency manifest {path}: {reason}")]
    ManifestRead { path: PathBuf, reason: String },

    #[error("Project directory not found: {0}")]
    ProjectNotFound(PathBuf),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl PodsyncError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::BootstrapFailed { .. } => {
                Some("Install CocoaPods manually: sudo gem install cocoapods")
            }
            Self::InstallFailed { .. } => {
                Some("Try: pod repo update, then re-run `podsync sync` (the stale cache was cleared)")
            }
            Self::Cancelled => {
                Some("The dependency cache was cleared; re-run `podsync sync` to install from scratch")
            }
            Self::ManifestRead { .. } => {
                Some("Run podsync from the project root, where package.json lives")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PodsyncError::BootstrapFailed {
            reason: "gem install exited with status 1".to_string(),
        };
        assert!(err.to_string().contains("CocoaPods CLI"));
    }

    #[test]
    fn error_hint() {
        let err = PodsyncError::Cancelled;
        assert!(err.hint().unwrap().contains("re-run"));

        let err = PodsyncError::User("oops".to_string());
        assert_eq!(err.hint(), None);
    }

    #[test]
    fn install_failed_carries_diagnostics() {
        let err = PodsyncError::InstallFailed {
            diagnostics: "Unable to find a specification for `FooKit`".to_string(),
        };
        assert!(err.to_string().contains("FooKit"));
    }
}

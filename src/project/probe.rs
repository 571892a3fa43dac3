//! Native project state probing
//!
//! Reports raw filesystem facts about the generated native subproject and
//! classifies them into an install state. The fingerprint comparison that
//! separates `UpToDate` from `PossiblyStale` is computed by the caller;
//! the probe itself never reads the dependency manifest or the cache.

use std::path::{Path, PathBuf};
use tracing::debug;

/// CocoaPods manifest inside the native subproject
pub const PODFILE: &str = "Podfile";
/// Lockfile written by a completed `pod install`
pub const PODFILE_LOCK: &str = "Podfile.lock";
/// Directory the installed pods land in
pub const PODS_DIR: &str = "Pods";

/// Filesystem facts about a native subproject, captured in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeArtifacts {
    /// Podfile exists, so the project uses CocoaPods at all
    pub has_manifest: bool,
    /// Podfile.lock exists
    pub has_lockfile: bool,
    /// Pods/ exists
    pub has_output_dir: bool,
}

impl NativeArtifacts {
    /// Inspect `<project_root>/<native_dir>` for install artifacts
    pub fn probe(project_root: &Path, native_dir: &str) -> Self {
        let native_root = project_root.join(native_dir);
        let artifacts = Self {
            has_manifest: native_root.join(PODFILE).is_file(),
            has_lockfile: native_root.join(PODFILE_LOCK).is_file(),
            has_output_dir: native_root.join(PODS_DIR).is_dir(),
        };
        debug!(
            path = %native_root.display(),
            manifest = artifacts.has_manifest,
            lockfile = artifacts.has_lockfile,
            output = artifacts.has_output_dir,
            "probed native project"
        );
        artifacts
    }

    /// Both install artifacts present. A fingerprint match is only trusted
    /// when this holds: a cache hit without a lockfile or Pods/ means an
    /// interrupted or externally-cleaned install, which must reinstall.
    pub fn installed_artifacts_present(&self) -> bool {
        self.has_lockfile && self.has_output_dir
    }

    /// Fold the caller's fingerprint comparison into a final state.
    /// `fingerprint_matches` is only consulted when both install artifacts
    /// exist; the other states are decided from the filesystem alone.
    pub fn classify(&self, fingerprint_matches: bool) -> NativeProjectState {
        if !self.has_manifest {
            NativeProjectState::NoNativeTooling
        } else if !self.installed_artifacts_present() {
            NativeProjectState::NeverInstalled
        } else if fingerprint_matches {
            NativeProjectState::UpToDate
        } else {
            NativeProjectState::PossiblyStale
        }
    }
}

/// Install state of the native subproject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeProjectState {
    /// No Podfile: nothing for the tool to manage
    NoNativeTooling,
    /// Podfile present but lockfile or Pods/ missing
    NeverInstalled,
    /// Artifacts present but the dependency fingerprint changed (or was
    /// never recorded)
    PossiblyStale,
    /// Artifacts present and the fingerprint matches the cache
    UpToDate,
}

impl NativeProjectState {
    /// Short human-readable label for status output
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoNativeTooling => "not using CocoaPods",
            Self::NeverInstalled => "never installed",
            Self::PossiblyStale => "possibly stale",
            Self::UpToDate => "up to date",
        }
    }
}

impl std::fmt::Display for NativeProjectState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Root of the native subproject
pub fn native_root(project_root: &Path, native_dir: &str) -> PathBuf {
    project_root.join(native_dir)
}

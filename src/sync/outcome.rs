//! Result vocabulary for a sync run

use crate::installer::InstallFailure;

/// Why a run finished without installing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No Podfile, so the project does not use CocoaPods
    NoNativeTooling,
    /// Install artifacts present and the dependency fingerprint is
    /// unchanged
    NoDependencyChange,
    /// The host cannot run the installer
    PlatformRestricted,
    /// An install was suggested and the user declined
    DeferredByUser,
}

impl SkipReason {
    /// One-line explanation shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoNativeTooling => "No Podfile found, nothing to sync",
            Self::NoDependencyChange => "Dependencies unchanged, pods already up to date",
            Self::PlatformRestricted => "CocoaPods requires macOS, leaving the project as is",
            Self::DeferredByUser => "Install deferred, run `podsync sync` when ready",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Final outcome of one sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Dependencies were installed
    Installed {
        /// False when the install succeeded but the new fingerprint could
        /// not be written back, so the next run will reinstall
        fingerprint_recorded: bool,
    },
    /// Nothing needed to happen
    Skipped(SkipReason),
    /// The install attempt failed; any cached fingerprint was dropped
    Aborted(InstallFailure),
}

impl SyncOutcome {
    /// True unless the run ended in an install failure
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Aborted(_))
    }
}

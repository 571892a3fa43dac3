//! External installer invocation
//!
//! Wraps the CocoaPods CLI behind a trait so the sync flow can be driven
//! with a scripted installer in tests. Failures are data, not errors: the
//! caller decides what a failed install means for the cache.

use crate::report::ProgressReporter;
use async_trait::async_trait;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child;

pub mod cocoapods;

pub use cocoapods::CocoaPodsInstaller;

/// Lines of trailing tool output kept as failure diagnostics
pub const INSTALL_ERROR_TAIL_LINES: usize = 50;

/// Host operating system, as far as installer support is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl HostPlatform {
    /// Detect the platform this process runs on
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }

    /// CocoaPods only runs on macOS hosts
    pub fn supports_cocoapods(&self) -> bool {
        matches!(self, Self::MacOs)
    }
}

impl std::fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
            Self::Windows => "Windows",
            Self::Other => "unsupported platform",
        };
        write!(f, "{name}")
    }
}

/// Why an install attempt did not produce a usable install
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallFailure {
    /// The CLI was missing and could not be obtained
    Bootstrap { reason: String },
    /// The install command ran and failed; carries trailing output
    Install { diagnostics: String },
    /// Interrupted by the user before completion
    Cancelled,
}

impl InstallFailure {
    /// Convert into the error surfaced to the user once the sync flow has
    /// finished reacting to the failure
    pub fn into_error(self) -> crate::error::PodsyncError {
        match self {
            Self::Bootstrap { reason } => crate::error::PodsyncError::BootstrapFailed { reason },
            Self::Install { diagnostics } => {
                crate::error::PodsyncError::InstallFailed { diagnostics }
            }
            Self::Cancelled => crate::error::PodsyncError::Cancelled,
        }
    }
}

impl std::fmt::Display for InstallFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bootstrap { reason } => write!(f, "CLI bootstrap failed: {reason}"),
            Self::Install { .. } => write!(f, "pod install failed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome of one install attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallResult {
    /// Dependencies installed and artifacts written
    Installed,
    /// The host cannot run this installer at all
    NotApplicable,
    /// The attempt did not complete
    Failed(InstallFailure),
}

/// Something that can place native dependencies into a project.
///
/// The single production implementation shells out to the CocoaPods CLI;
/// sync flow tests substitute scripted results.
#[async_trait]
pub trait Installer: Send + Sync {
    /// Run a full install into the native subproject at `native_root`,
    /// narrating progress through `reporter`
    async fn install(&self, native_root: &Path, reporter: &dyn ProgressReporter) -> InstallResult;
}

/// Keep the last [`INSTALL_ERROR_TAIL_LINES`] lines of tool output as a
/// readable failure report
pub(crate) fn diagnostics_tail(lines: &[String]) -> String {
    let start = lines.len().saturating_sub(INSTALL_ERROR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Forward a child's stdout and stderr line by line to the reporter while
/// collecting everything for diagnostics. Returns once both streams close.
pub(crate) async fn stream_child_output(
    child: &mut Child,
    reporter: &dyn ProgressReporter,
) -> std::io::Result<Vec<String>> {
    use std::io::{Error, ErrorKind};

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::new(ErrorKind::Other, "child stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| Error::new(ErrorKind::Other, "child stderr was not piped"))?;

    let mut stdout_lines = BufReader::new(stdout).lines();
    let mut stderr_lines = BufReader::new(stderr).lines();
    let mut collected = Vec::new();
    let mut stdout_done = false;
    let mut stderr_done = false;

    while !(stdout_done && stderr_done) {
        tokio::select! {
            line = stdout_lines.next_line(), if !stdout_done => match line? {
                Some(line) => {
                    reporter.output_line(&line);
                    collected.push(line);
                }
                None => stdout_done = true,
            },
            line = stderr_lines.next_line(), if !stderr_done => match line? {
                Some(line) => {
                    reporter.output_line(&line);
                    collected.push(line);
                }
                None => stderr_done = true,
            },
        }
    }

    Ok(collected)
}

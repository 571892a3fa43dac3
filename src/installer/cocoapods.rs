//! CocoaPods CLI integration
//!
//! Locates the `pod` binary, obtains it through RubyGems when missing, and
//! runs `pod install` inside the native subproject with its output streamed
//! to the active reporter. Ctrl-C during a run kills the child and surfaces
//! as a cancellation failure.

use super::{
    diagnostics_tail, stream_child_output, HostPlatform, InstallFailure, InstallResult, Installer,
};
use crate::report::ProgressReporter;
use async_trait::async_trait;
use semver::Version;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// CLI binary used when the configuration does not override it
pub const DEFAULT_BINARY: &str = "pod";

/// Invokes the CocoaPods CLI on a macOS host
pub struct CocoaPodsInstaller {
    binary: String,
    bootstrap: bool,
    min_version: Option<Version>,
    platform: HostPlatform,
}

impl CocoaPodsInstaller {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            bootstrap: true,
            min_version: None,
            platform: HostPlatform::detect(),
        }
    }

    /// Allow or forbid obtaining the CLI via `gem install` when missing
    pub fn with_bootstrap(mut self, enabled: bool) -> Self {
        self.bootstrap = enabled;
        self
    }

    /// Version below which a warning is logged. Never fails the run.
    pub fn with_min_version(mut self, minimum: Option<Version>) -> Self {
        self.min_version = minimum;
        self
    }

    /// Override platform detection
    pub fn with_platform(mut self, platform: HostPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Version reported by `pod --version`, or `None` when the CLI is
    /// missing or broken
    pub async fn cli_version(&self) -> Option<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if version.is_empty() {
            None
        } else {
            Some(version)
        }
    }

    async fn bootstrap_cli(&self, reporter: &dyn ProgressReporter) -> Result<(), InstallFailure> {
        let mut command = Command::new("gem");
        command.args(["install", "cocoapods", "--no-document"]);

        match run_captured(command, reporter).await {
            Ok(_) => {}
            Err(RunFailure::Cancelled) => return Err(InstallFailure::Cancelled),
            Err(RunFailure::Launch(e)) => {
                return Err(InstallFailure::Bootstrap {
                    reason: format!("could not run `gem install cocoapods`: {e}"),
                })
            }
            Err(RunFailure::Stream(e)) => {
                return Err(InstallFailure::Bootstrap {
                    reason: format!("lost contact with `gem install cocoapods`: {e}"),
                })
            }
            Err(RunFailure::Exited { status_line, lines }) => {
                return Err(InstallFailure::Bootstrap {
                    reason: format!(
                        "`gem install cocoapods` failed ({status_line}):\n{}",
                        diagnostics_tail(&lines)
                    ),
                })
            }
        }

        if self.cli_version().await.is_none() {
            return Err(InstallFailure::Bootstrap {
                reason: format!(
                    "`gem install cocoapods` finished but `{}` is still not available",
                    self.binary
                ),
            });
        }
        Ok(())
    }

    async fn run_pod_install(
        &self,
        native_root: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<(), InstallFailure> {
        let mut command = Command::new(&self.binary);
        command.arg("install").current_dir(native_root);

        match run_captured(command, reporter).await {
            Ok(_) => Ok(()),
            Err(RunFailure::Cancelled) => Err(InstallFailure::Cancelled),
            Err(RunFailure::Launch(e)) => Err(InstallFailure::Install {
                diagnostics: format!("could not run `{} install`: {e}", self.binary),
            }),
            Err(RunFailure::Stream(e)) => Err(InstallFailure::Install {
                diagnostics: format!("lost contact with `{} install`: {e}", self.binary),
            }),
            Err(RunFailure::Exited { status_line, lines }) => {
                let mut diagnostics = format!("`{} install` failed ({status_line})", self.binary);
                let tail = diagnostics_tail(&lines);
                if !tail.is_empty() {
                    diagnostics.push('\n');
                    diagnostics.push_str(&tail);
                }
                Err(InstallFailure::Install { diagnostics })
            }
        }
    }
}

#[async_trait]
impl Installer for CocoaPodsInstaller {
    async fn install(&self, native_root: &Path, reporter: &dyn ProgressReporter) -> InstallResult {
        if !self.platform.supports_cocoapods() {
            debug!(platform = %self.platform, "host cannot run CocoaPods");
            return InstallResult::NotApplicable;
        }

        reporter.update("Checking for the CocoaPods CLI");
        match self.cli_version().await {
            Some(version) => {
                debug!(%version, binary = %self.binary, "found CocoaPods CLI");
                if let Some(minimum) = &self.min_version {
                    if version_below_minimum(&version, minimum) {
                        reporter.warn(&format!(
                            "CocoaPods {version} is older than the supported minimum {minimum}"
                        ));
                    }
                }
            }
            None if self.bootstrap => {
                reporter.update("Installing the CocoaPods CLI");
                if let Err(failure) = self.bootstrap_cli(reporter).await {
                    return InstallResult::Failed(failure);
                }
            }
            None => {
                return InstallResult::Failed(InstallFailure::Bootstrap {
                    reason: format!(
                        "`{}` is not available and automatic setup is disabled",
                        self.binary
                    ),
                });
            }
        }

        reporter.update("Installing pods");
        match self.run_pod_install(native_root, reporter).await {
            Ok(()) => InstallResult::Installed,
            Err(failure) => InstallResult::Failed(failure),
        }
    }
}

enum RunFailure {
    Launch(std::io::Error),
    Stream(std::io::Error),
    Cancelled,
    Exited {
        status_line: String,
        lines: Vec<String>,
    },
}

/// Run a command with its output captured and streamed, watching for
/// Ctrl-C the whole time. Stdin stays attached to the terminal so tools
/// that prompt (gem asking for credentials) still work.
async fn run_captured(
    mut command: Command,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<String>, RunFailure> {
    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(RunFailure::Launch)?;

    let streamed = tokio::select! {
        streamed = stream_child_output(&mut child, reporter) => Some(streamed),
        _ = tokio::signal::ctrl_c() => None,
    };

    let lines = match streamed {
        None => {
            let _ = child.kill().await;
            return Err(RunFailure::Cancelled);
        }
        Some(Err(e)) => {
            let _ = child.kill().await;
            return Err(RunFailure::Stream(e));
        }
        Some(Ok(lines)) => lines,
    };

    let status = child.wait().await.map_err(RunFailure::Stream)?;
    if status.success() {
        Ok(lines)
    } else {
        let status_line = match status.code() {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        };
        Err(RunFailure::Exited { status_line, lines })
    }
}

fn version_below_minimum(reported: &str, minimum: &Version) -> bool {
    match Version::parse(reported.trim()) {
        Ok(version) => version < *minimum,
        Err(_) => false,
    }
}

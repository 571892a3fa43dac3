//! Sync decision flow
//!
//! Decides between skipping, installing silently, and asking first, then
//! reconciles the fingerprint cache with what actually happened. The cache
//! is only ever trusted after a fully successful install: any failed or
//! interrupted attempt drops the record so the next run cannot skip over a
//! broken Pods tree.

use crate::cache::ChecksumStore;
use crate::error::{PodsyncError, PodsyncResult};
use crate::installer::{InstallResult, Installer};
use crate::project::{self, DependencyManifest, NativeArtifacts, NativeProjectState};
use crate::report::ProgressReporter;
use crate::sync::outcome::{SkipReason, SyncOutcome};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Asks the user whether a suggested reinstall should go ahead.
///
/// Only consulted when staleness was detected organically; explicit
/// `--force` runs and first-time installs never ask.
#[async_trait]
pub trait InstallPrompt: Send + Sync {
    async fn confirm_install(&self) -> PodsyncResult<bool>;
}

/// One sync invocation
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Directory holding package.json
    pub project_root: PathBuf,
    /// Native subproject directory name under the project root
    pub native_dir: String,
    /// Reinstall even when the fingerprint is unchanged, without asking
    pub force: bool,
}

/// Drives one sync run end to end
pub struct SyncController<'a> {
    installer: &'a dyn Installer,
    prompt: &'a dyn InstallPrompt,
    reporter: &'a dyn ProgressReporter,
}

impl<'a> SyncController<'a> {
    pub fn new(
        installer: &'a dyn Installer,
        prompt: &'a dyn InstallPrompt,
        reporter: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            installer,
            prompt,
            reporter,
        }
    }

    pub async fn sync(&self, request: &SyncRequest) -> PodsyncResult<SyncOutcome> {
        let project_root = &request.project_root;
        if !project_root.is_dir() {
            return Err(PodsyncError::ProjectNotFound(project_root.clone()));
        }

        let artifacts = NativeArtifacts::probe(project_root, &request.native_dir);
        if !artifacts.has_manifest {
            debug!(
                native_dir = %request.native_dir,
                "no Podfile, nothing to manage"
            );
            return Ok(SyncOutcome::Skipped(SkipReason::NoNativeTooling));
        }

        let manifest = DependencyManifest::read(project_root).await?;
        let fingerprint = manifest.fingerprint();
        let store = ChecksumStore::for_project(project_root);

        // An absent or unreadable record counts as a mismatch
        let cached = store.read().await;
        let state = artifacts.classify(cached.as_ref() == Some(&fingerprint));
        debug!(?state, force = request.force, "classified native project");

        match state {
            NativeProjectState::UpToDate if !request.force => {
                info!("dependency fingerprint unchanged");
                return Ok(SyncOutcome::Skipped(SkipReason::NoDependencyChange));
            }
            NativeProjectState::PossiblyStale if !request.force => {
                if !self.prompt.confirm_install().await? {
                    info!("user deferred the install");
                    return Ok(SyncOutcome::Skipped(SkipReason::DeferredByUser));
                }
            }
            // NeverInstalled and forced runs install without asking
            _ => {}
        }

        let native_root = project::native_root(project_root, &request.native_dir);
        match self.installer.install(&native_root, self.reporter).await {
            InstallResult::NotApplicable => {
                // Cache stays byte-identical so a capable host picks up
                // exactly where this one left off
                info!("installer not available on this host");
                Ok(SyncOutcome::Skipped(SkipReason::PlatformRestricted))
            }
            InstallResult::Installed => {
                let fingerprint_recorded = match store.write(&fingerprint).await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("install succeeded but the fingerprint could not be recorded: {e}");
                        false
                    }
                };
                Ok(SyncOutcome::Installed {
                    fingerprint_recorded,
                })
            }
            InstallResult::Failed(failure) => {
                // A stale record must not mask the failure on the next run
                if let Err(e) = store.invalidate().await {
                    warn!("could not drop the stale fingerprint record: {e}");
                }
                Ok(SyncOutcome::Aborted(failure))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ChecksumStore, DependencyFingerprint};
    use crate::installer::InstallFailure;
    use crate::report::LogReporter;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct ScriptedInstaller {
        result: InstallResult,
        calls: AtomicUsize,
    }

    impl ScriptedInstaller {
        fn new(result: InstallResult) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }

        fn succeeding() -> Self {
            Self::new(InstallResult::Installed)
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Installer for ScriptedInstaller {
        async fn install(
            &self,
            _native_root: &Path,
            _reporter: &dyn ProgressReporter,
        ) -> InstallResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    struct ScriptedPrompt {
        answer: bool,
        asked: AtomicUsize,
    }

    impl ScriptedPrompt {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                asked: AtomicUsize::new(0),
            }
        }

        fn asked(&self) -> usize {
            self.asked.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InstallPrompt for ScriptedPrompt {
        async fn confirm_install(&self) -> PodsyncResult<bool> {
            self.asked.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer)
        }
    }

    fn project(deps: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let map: HashMap<&str, &str> = deps.iter().copied().collect();
        let manifest = serde_json::json!({ "name": "demo", "dependencies": map });
        std::fs::write(
            temp.path().join("package.json"),
            serde_json::to_string_pretty(&manifest).unwrap(),
        )
        .unwrap();
        temp
    }

    fn add_native(temp: &TempDir, lockfile: bool, pods: bool) {
        let ios = temp.path().join("ios");
        std::fs::create_dir_all(&ios).unwrap();
        std::fs::write(ios.join("Podfile"), "platform :ios, '15.1'\n").unwrap();
        if lockfile {
            std::fs::write(ios.join("Podfile.lock"), "PODS:\n").unwrap();
        }
        if pods {
            std::fs::create_dir_all(ios.join("Pods")).unwrap();
        }
    }

    async fn current_fingerprint(root: &Path) -> DependencyFingerprint {
        DependencyManifest::read(root).await.unwrap().fingerprint()
    }

    async fn seed_matching_cache(root: &Path) {
        let fingerprint = current_fingerprint(root).await;
        ChecksumStore::for_project(root)
            .write(&fingerprint)
            .await
            .unwrap();
    }

    async fn seed_stale_cache(root: &Path) {
        let stale = DependencyFingerprint {
            runtime: "0".repeat(64),
            dev: "0".repeat(64),
        };
        ChecksumStore::for_project(root).write(&stale).await.unwrap();
    }

    fn request(root: &Path) -> SyncRequest {
        SyncRequest {
            project_root: root.to_path_buf(),
            native_dir: "ios".to_string(),
            force: false,
        }
    }

    #[tokio::test]
    async fn project_without_podfile_is_skipped() {
        let temp = project(&[("react", "^18.2.0")]);
        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(true);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let outcome = controller.sync(&request(temp.path())).await.unwrap();

        assert_eq!(outcome, SyncOutcome::Skipped(SkipReason::NoNativeTooling));
        assert_eq!(installer.calls(), 0);
        assert_eq!(prompt.asked(), 0);
    }

    #[tokio::test]
    async fn fresh_project_installs_without_asking() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, false, false);
        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(false);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let outcome = controller.sync(&request(temp.path())).await.unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::Installed {
                fingerprint_recorded: true
            }
        );
        assert_eq!(installer.calls(), 1);
        assert_eq!(prompt.asked(), 0);

        let recorded = ChecksumStore::for_project(temp.path()).read().await;
        assert_eq!(recorded, Some(current_fingerprint(temp.path()).await));
    }

    #[tokio::test]
    async fn unchanged_fingerprint_skips_install() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, true, true);
        seed_matching_cache(temp.path()).await;
        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(true);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let outcome = controller.sync(&request(temp.path())).await.unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::Skipped(SkipReason::NoDependencyChange)
        );
        assert_eq!(installer.calls(), 0);
        assert_eq!(prompt.asked(), 0);
    }

    #[tokio::test]
    async fn changed_fingerprint_asks_then_installs() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, true, true);
        seed_stale_cache(temp.path()).await;
        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(true);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let outcome = controller.sync(&request(temp.path())).await.unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::Installed {
                fingerprint_recorded: true
            }
        );
        assert_eq!(prompt.asked(), 1);
        assert_eq!(installer.calls(), 1);

        let recorded = ChecksumStore::for_project(temp.path()).read().await;
        assert_eq!(recorded, Some(current_fingerprint(temp.path()).await));
    }

    #[tokio::test]
    async fn declined_prompt_defers_and_keeps_cache() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, true, true);
        seed_stale_cache(temp.path()).await;
        let cache_file = ChecksumStore::for_project(temp.path()).file_path();
        let before = std::fs::read(&cache_file).unwrap();

        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(false);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let outcome = controller.sync(&request(temp.path())).await.unwrap();

        assert_eq!(outcome, SyncOutcome::Skipped(SkipReason::DeferredByUser));
        assert_eq!(installer.calls(), 0);
        assert_eq!(std::fs::read(&cache_file).unwrap(), before);
    }

    #[tokio::test]
    async fn absent_record_counts_as_changed() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, true, true);
        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(true);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        controller.sync(&request(temp.path())).await.unwrap();

        assert_eq!(prompt.asked(), 1);
        assert_eq!(installer.calls(), 1);
    }

    #[tokio::test]
    async fn repeat_run_without_changes_skips() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, true, true);
        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(true);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let first = controller.sync(&request(temp.path())).await.unwrap();
        let second = controller.sync(&request(temp.path())).await.unwrap();

        assert_eq!(
            first,
            SyncOutcome::Installed {
                fingerprint_recorded: true
            }
        );
        assert_eq!(second, SyncOutcome::Skipped(SkipReason::NoDependencyChange));
        assert_eq!(installer.calls(), 1);
    }

    #[tokio::test]
    async fn force_reinstalls_without_asking() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, true, true);
        seed_matching_cache(temp.path()).await;
        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(false);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let mut req = request(temp.path());
        req.force = true;
        let outcome = controller.sync(&req).await.unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::Installed {
                fingerprint_recorded: true
            }
        );
        assert_eq!(prompt.asked(), 0);
        assert_eq!(installer.calls(), 1);
    }

    #[tokio::test]
    async fn missing_lockfile_overrides_matching_cache() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, false, true);
        seed_matching_cache(temp.path()).await;
        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(false);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let outcome = controller.sync(&request(temp.path())).await.unwrap();

        // Interrupted installs reinstall silently even on a cache hit
        assert_eq!(
            outcome,
            SyncOutcome::Installed {
                fingerprint_recorded: true
            }
        );
        assert_eq!(prompt.asked(), 0);
        assert_eq!(installer.calls(), 1);
    }

    #[tokio::test]
    async fn failed_install_drops_the_record() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, false, false);
        seed_stale_cache(temp.path()).await;
        let installer = ScriptedInstaller::new(InstallResult::Failed(InstallFailure::Install {
            diagnostics: "pod exploded".to_string(),
        }));
        let prompt = ScriptedPrompt::new(true);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let outcome = controller.sync(&request(temp.path())).await.unwrap();

        assert!(matches!(
            outcome,
            SyncOutcome::Aborted(InstallFailure::Install { .. })
        ));
        let store = ChecksumStore::for_project(temp.path());
        assert_eq!(store.read().await, None);
        assert!(!store.file_path().exists());
    }

    #[tokio::test]
    async fn run_after_failure_installs_again() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, true, true);
        seed_matching_cache(temp.path()).await;
        let prompt = ScriptedPrompt::new(true);

        let failing = ScriptedInstaller::new(InstallResult::Failed(InstallFailure::Install {
            diagnostics: "pod exploded".to_string(),
        }));
        let controller = SyncController::new(&failing, &prompt, &LogReporter);
        let mut forced = request(temp.path());
        forced.force = true;
        let aborted = controller.sync(&forced).await.unwrap();
        assert!(matches!(aborted, SyncOutcome::Aborted(_)));

        // Same fingerprint, but the dropped record forces a reinstall
        let retry = ScriptedInstaller::succeeding();
        let controller = SyncController::new(&retry, &prompt, &LogReporter);
        let outcome = controller.sync(&request(temp.path())).await.unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::Installed {
                fingerprint_recorded: true
            }
        );
        assert_eq!(retry.calls(), 1);
    }

    #[tokio::test]
    async fn cancelled_install_drops_the_record() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, false, false);
        seed_stale_cache(temp.path()).await;
        let installer = ScriptedInstaller::new(InstallResult::Failed(InstallFailure::Cancelled));
        let prompt = ScriptedPrompt::new(true);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let outcome = controller.sync(&request(temp.path())).await.unwrap();

        assert_eq!(outcome, SyncOutcome::Aborted(InstallFailure::Cancelled));
        assert_eq!(ChecksumStore::for_project(temp.path()).read().await, None);
    }

    #[tokio::test]
    async fn unsupported_host_leaves_cache_untouched() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, false, false);
        seed_stale_cache(temp.path()).await;
        let cache_file = ChecksumStore::for_project(temp.path()).file_path();
        let before = std::fs::read(&cache_file).unwrap();

        let installer = ScriptedInstaller::new(InstallResult::NotApplicable);
        let prompt = ScriptedPrompt::new(true);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let outcome = controller.sync(&request(temp.path())).await.unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::Skipped(SkipReason::PlatformRestricted)
        );
        assert_eq!(std::fs::read(&cache_file).unwrap(), before);
    }

    #[tokio::test]
    async fn unrecordable_fingerprint_still_reports_install() {
        let temp = project(&[("react", "^18.2.0")]);
        add_native(&temp, false, false);
        // A file squatting on the cache directory path makes writes fail
        std::fs::write(temp.path().join(".podsync"), "").unwrap();

        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(true);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let outcome = controller.sync(&request(temp.path())).await.unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::Installed {
                fingerprint_recorded: false
            }
        );
    }

    #[tokio::test]
    async fn missing_project_root_errors() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("nope");
        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(true);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let err = controller.sync(&request(&gone)).await.unwrap_err();
        assert!(matches!(err, PodsyncError::ProjectNotFound(_)));
    }

    #[tokio::test]
    async fn podfile_without_manifest_errors() {
        let temp = TempDir::new().unwrap();
        let ios = temp.path().join("ios");
        std::fs::create_dir_all(&ios).unwrap();
        std::fs::write(ios.join("Podfile"), "").unwrap();

        let installer = ScriptedInstaller::succeeding();
        let prompt = ScriptedPrompt::new(true);
        let controller = SyncController::new(&installer, &prompt, &LogReporter);

        let err = controller.sync(&request(temp.path())).await.unwrap_err();
        assert!(matches!(err, PodsyncError::ManifestRead { .. }));
        assert_eq!(installer.calls(), 0);
    }
}

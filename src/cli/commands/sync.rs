//! Sync command - reconcile installed pods with the dependency manifest

use crate::cli::args::SyncArgs;
use crate::config::Config;
use crate::error::PodsyncResult;
use crate::installer::CocoaPodsInstaller;
use crate::report::ProgressReporter;
use crate::sync::{SkipReason, SyncController, SyncOutcome, SyncRequest};
use crate::ui::{self, ConfirmInstallPrompt, SpinnerReporter, UiContext};
use tracing::debug;

/// Execute the sync command
pub async fn execute(args: SyncArgs, config: &Config) -> PodsyncResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);
    ui::intro(&ctx, "podsync");

    let project_root = super::resolve_project_root(args.project)?;
    debug!("project root: {}", project_root.display());

    let installer = CocoaPodsInstaller::new(&config.installer.binary)
        .with_bootstrap(config.installer.bootstrap)
        .with_min_version(config.installer.minimum_version());
    let prompt = ConfirmInstallPrompt::new(&ctx);
    let reporter = SpinnerReporter::new(&ctx);
    let controller = SyncController::new(&installer, &prompt, &reporter);

    let request = SyncRequest {
        project_root,
        native_dir: config.project.native_dir.clone(),
        force: args.force,
    };

    match controller.sync(&request).await? {
        SyncOutcome::Installed {
            fingerprint_recorded,
        } => {
            if fingerprint_recorded {
                reporter.finish_ok("Pods installed");
                ui::outro_success(&ctx, "Native dependencies are in sync");
            } else {
                reporter.finish_warn("Pods installed, but the fingerprint was not recorded");
                ui::outro_warn(&ctx, "In sync for now; the next run will reinstall");
            }
            Ok(())
        }
        SyncOutcome::Skipped(reason) => {
            match reason {
                SkipReason::NoNativeTooling | SkipReason::NoDependencyChange => {
                    ui::outro_success(&ctx, reason.message());
                }
                SkipReason::PlatformRestricted | SkipReason::DeferredByUser => {
                    ui::outro_warn(&ctx, reason.message());
                }
            }
            Ok(())
        }
        SyncOutcome::Aborted(failure) => {
            reporter.finish_error(&failure.to_string());
            ui::outro_error(&ctx, "Sync failed");
            Err(failure.into_error())
        }
    }
}

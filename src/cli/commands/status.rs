//! Status command - show the project's install state

use crate::cache::ChecksumStore;
use crate::cli::args::StatusArgs;
use crate::config::Config;
use crate::error::PodsyncResult;
use crate::installer::{CocoaPodsInstaller, HostPlatform};
use crate::project::{DependencyManifest, NativeArtifacts, NativeProjectState};
use crate::ui::{self, UiContext};

/// Execute the status command
pub async fn execute(args: StatusArgs, config: &Config) -> PodsyncResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "podsync status");

    let project_root = super::resolve_project_root(args.project)?;
    let native_dir = &config.project.native_dir;

    ui::section(&ctx, "Project");
    ui::key_value(&ctx, "root", &project_root.display().to_string());
    ui::key_value(&ctx, "native dir", native_dir);

    let artifacts = NativeArtifacts::probe(&project_root, native_dir);
    if !artifacts.has_manifest {
        ui::key_value(&ctx, "state", NativeProjectState::NoNativeTooling.label());
        ui::outro_success(&ctx, "Nothing for podsync to manage");
        return Ok(());
    }

    // Tolerate a broken manifest here; only sync needs it to parse
    let fingerprint = match DependencyManifest::read(&project_root).await {
        Ok(manifest) => Some(manifest.fingerprint()),
        Err(e) => {
            ui::step_warn(&ctx, &format!("Could not read package.json: {e}"));
            None
        }
    };

    let store = ChecksumStore::for_project(&project_root);
    let cached = store.read().await;
    let matches = matches!((&fingerprint, &cached), (Some(f), Some(c)) if f == c);
    let state = artifacts.classify(matches);

    ui::key_value_status(&ctx, "state", state.label(), state == NativeProjectState::UpToDate);
    ui::key_value_status(
        &ctx,
        "Podfile.lock",
        if artifacts.has_lockfile { "present" } else { "missing" },
        artifacts.has_lockfile,
    );
    ui::key_value_status(
        &ctx,
        "Pods directory",
        if artifacts.has_output_dir { "present" } else { "missing" },
        artifacts.has_output_dir,
    );

    ui::section(&ctx, "Fingerprint cache");
    ui::key_value(&ctx, "file", &store.file_path().display().to_string());
    match &cached {
        Some(record) => {
            ui::key_value(&ctx, "dependencies", short_hash(&record.runtime));
            ui::key_value(&ctx, "devDependencies", short_hash(&record.dev));
            if let Some(recorded) = super::file_modified(&store.file_path()) {
                ui::key_value(&ctx, "recorded", &recorded);
            }
        }
        None => ui::step_info(&ctx, "No fingerprint recorded"),
    }

    ui::section(&ctx, "CocoaPods CLI");
    let platform = HostPlatform::detect();
    if !platform.supports_cocoapods() {
        ui::key_value_status(
            &ctx,
            "host",
            &format!("{platform} (installs run on macOS only)"),
            false,
        );
    }
    let installer = CocoaPodsInstaller::new(&config.installer.binary);
    match installer.cli_version().await {
        Some(version) => ui::key_value_status(&ctx, &config.installer.binary, &version, true),
        None => ui::key_value_status(&ctx, &config.installer.binary, "not found", false),
    }

    match state {
        NativeProjectState::UpToDate => ui::outro_success(&ctx, "Everything is in sync"),
        _ => ui::outro_warn(&ctx, "Run `podsync sync` to update pods"),
    }

    Ok(())
}

/// Abbreviate a fingerprint hash for display
fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

//! Cache command - inspect and drop recorded fingerprints

use crate::cache::ChecksumStore;
use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::Config;
use crate::error::PodsyncResult;
use crate::project::DependencyManifest;
use crate::ui::{self, UiContext};
use console::style;
use std::path::PathBuf;

/// Execute the cache command
pub async fn execute(args: CacheArgs, _config: &Config) -> PodsyncResult<()> {
    match args.action {
        CacheAction::Info { project } => show_info(project).await,
        CacheAction::Clear { project, yes } => clear(project, yes).await,
    }
}

/// Show the recorded fingerprint next to what package.json hashes to now
async fn show_info(project: Option<PathBuf>) -> PodsyncResult<()> {
    let project_root = super::resolve_project_root(project)?;
    let store = ChecksumStore::for_project(&project_root);

    println!("Project: {}", project_root.display());
    println!("Cache file: {}", store.file_path().display());
    println!();

    let recorded = store.read().await;
    match &recorded {
        Some(record) => {
            println!("Recorded fingerprint:");
            print_hashes(&record.runtime, &record.dev);
            if let Some(when) = super::file_modified(&store.file_path()) {
                println!("  {} recorded         {}", style("•").cyan(), when);
            }
        }
        None => {
            println!("No fingerprint recorded. The next `podsync sync` will install.");
        }
    }

    // Freshness only means something against what package.json declares now
    let current = match DependencyManifest::read(&project_root).await {
        Ok(manifest) => Some(manifest.fingerprint()),
        Err(e) => {
            println!("{} Could not read package.json: {e}", style("!").yellow());
            None
        }
    };

    if let Some(fingerprint) = &current {
        println!();
        println!("Current fingerprint:");
        print_hashes(&fingerprint.runtime, &fingerprint.dev);
    }

    if let (Some(record), Some(fingerprint)) = (&recorded, &current) {
        println!();
        if record == fingerprint {
            println!(
                "{} Fingerprint is current. The next sync will skip pod install.",
                style("✓").green()
            );
        } else {
            println!(
                "{} Fingerprint is stale. The next sync will run pod install.",
                style("!").yellow()
            );
        }
    }

    Ok(())
}

fn print_hashes(runtime: &str, dev: &str) {
    println!("  {} dependencies     {}", style("•").cyan(), runtime);
    println!("  {} devDependencies  {}", style("•").cyan(), dev);
}

/// Drop the recorded fingerprint after confirmation
async fn clear(project: Option<PathBuf>, skip_confirm: bool) -> PodsyncResult<()> {
    let project_root = super::resolve_project_root(project)?;
    let store = ChecksumStore::for_project(&project_root);

    if !store.file_path().exists() {
        println!("No recorded fingerprint to clear.");
        return Ok(());
    }

    println!(
        "This will drop the recorded fingerprint at {}",
        store.file_path().display()
    );

    // Unattended runs clear without asking, same policy as the sync prompt
    let ctx = UiContext::detect().with_auto_yes(skip_confirm);
    if !ui::confirm(&ctx, "Clear it now?", true).await? {
        println!("Kept the recorded fingerprint.");
        return Ok(());
    }

    store.invalidate().await?;
    println!(
        "{} Fingerprint cleared. The next sync will run pod install.",
        style("✓").green()
    );

    Ok(())
}

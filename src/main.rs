//! Podsync - CocoaPods sync for generated native projects
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use podsync::cli::{Cli, Commands};
use podsync::config::ConfigManager;
use podsync::error::{PodsyncError, PodsyncResult};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> PodsyncResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    podsync::ui::init_theme();

    // Init writes the config other commands load, so it skips loading
    if let Commands::Init(args) = cli.command {
        return podsync::cli::commands::init(args).await;
    }

    let config_manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let local = discover_local_config(cli.no_local)?;
    let config = config_manager.load_merged(local.as_deref()).await?;

    match cli.command {
        Commands::Init(_) => unreachable!("Init handled above"),
        Commands::Sync(args) => podsync::cli::commands::sync(args, &config).await,
        Commands::Status(args) => podsync::cli::commands::status(args, &config).await,
        Commands::Cache(args) => podsync::cli::commands::cache(args, &config).await,
    }
}

/// Log level by flag count: 0 = warn (spinners only), 1 = info, 2+ = debug
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("podsync=warn"),
        1 => EnvFilter::new("podsync=info"),
        _ => EnvFilter::new("podsync=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Project-local `.podsync.toml`, discovered upward from the working
/// directory unless disabled
fn discover_local_config(no_local: bool) -> PodsyncResult<Option<PathBuf>> {
    if no_local {
        debug!("local config discovery disabled");
        return Ok(None);
    }

    let cwd = std::env::current_dir()
        .map_err(|e| PodsyncError::io("getting current directory", e))?;
    let found = ConfigManager::find_local_config(&cwd);
    if let Some(ref path) = found {
        debug!("found local config at {}", path.display());
    }
    Ok(found)
}

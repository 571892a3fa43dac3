//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Podsync - CocoaPods sync for generated native projects
///
/// Fingerprints the dependencies declared in package.json and runs
/// `pod install` only when they changed since the last successful
/// install.
#[derive(Parser, Debug)]
#[command(name = "podsync", author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output; repeat for debug detail
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Global config file path
    #[arg(short, long, global = true, env = "PODSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .podsync.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install pods if the dependency fingerprint changed
    Sync(SyncArgs),

    /// Create a project-local .podsync.toml config
    Init(InitArgs),

    /// Show the project's install state and cache details
    Status(StatusArgs),

    /// Inspect or drop the recorded fingerprint
    Cache(CacheArgs),
}

/// Sync command arguments
#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Project root (defaults to the working directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Reinstall even when the fingerprint is unchanged
    #[arg(short, long)]
    pub force: bool,

    /// Auto-approve the reinstall prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Project root (defaults to the working directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,
}

/// Init command arguments
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Replace an existing .podsync.toml
    #[arg(short, long)]
    pub force: bool,

    /// Directory to create the config in (defaults to the working
    /// directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// Cache command arguments
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Cache operation
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show the recorded fingerprint for a project
    Info {
        /// Project root (defaults to the working directory)
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Drop the recorded fingerprint so the next sync installs
    Clear {
        /// Project root (defaults to the working directory)
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Clear without asking
        #[arg(short, long)]
        yes: bool,
    },
}

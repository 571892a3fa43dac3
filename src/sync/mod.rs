//! Sync orchestration
//!
//! Ties the probe, the fingerprint cache, and the installer together into
//! one decision flow. See [`controller::SyncController`] for the rules.

pub mod controller;
pub mod outcome;

pub use controller::{InstallPrompt, SyncController, SyncRequest};
pub use outcome::{SkipReason, SyncOutcome};

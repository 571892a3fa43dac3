//! Podsync - CocoaPods sync for generated native projects
//!
//! Fingerprints the dependencies declared in package.json and runs
//! `pod install` only when they drifted from the last successful
//! install.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod project;
pub mod report;
pub mod sync;
pub mod ui;

pub use error::{PodsyncError, PodsyncResult};

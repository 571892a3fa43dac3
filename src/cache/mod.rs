//! Dependency fingerprint cache
//!
//! Detects dependency changes without storing the dependency lists
//! themselves: a normalized content hash per manifest section is persisted
//! after each successful install and compared on the next run.
//!
//! # Lifecycle
//!
//! | Event                    | Cache record |
//! |--------------------------|--------------|
//! | First successful install | created      |
//! | Later successful install | overwritten  |
//! | Any failed attempt       | deleted      |
//!
//! A deleted record forces the next run to treat the project as stale, so
//! a half-completed install is never mistaken for an up-to-date one.

pub mod fingerprint;
pub mod store;

pub use fingerprint::{hash_dependency_map, DependencyFingerprint};
pub use store::{ChecksumStore, CACHE_DIR_NAME, CACHE_FILE_NAME};

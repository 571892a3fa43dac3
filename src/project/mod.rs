//! Project inspection: dependency manifest and native subproject state

pub mod manifest;
pub mod probe;

pub use manifest::{manifest_path, DependencyManifest, MANIFEST_FILE_NAME};
pub use probe::{native_root, NativeArtifacts, NativeProjectState};

//! Dependency fingerprinting for change detection
//!
//! Derives a stable content hash from a project's declared dependency
//! lists. Same logical dependencies = same fingerprint, regardless of the
//! order the manifest happens to list them in.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Content hashes over a project's runtime and dev dependency lists.
///
/// This struct is also the on-disk cache record: the serde field names
/// mirror the package.json sections each hash was computed from, so the
/// cache file reads as `{"dependencies": "...", "devDependencies": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyFingerprint {
    /// Hash over the `dependencies` section
    #[serde(rename = "dependencies")]
    pub runtime: String,

    /// Hash over the `devDependencies` section
    #[serde(rename = "devDependencies")]
    pub dev: String,
}

impl DependencyFingerprint {
    /// Compute the fingerprint for a pair of `{name: version-range}` maps
    pub fn compute(
        runtime: &HashMap<String, String>,
        dev: &HashMap<String, String>,
    ) -> Self {
        Self {
            runtime: hash_dependency_map(runtime),
            dev: hash_dependency_map(dev),
        }
    }
}

/// Hash a `{name: version-range}` map into a lowercase hex SHA256 digest.
///
/// Entries are sorted by name before hashing, so the digest is invariant
/// under key reordering and changes exactly when a name or range changes.
/// The empty map hashes the empty string, a fixed value.
pub fn hash_dependency_map(deps: &HashMap<String, String>) -> String {
    let mut entries: Vec<(&String, &String)> = deps.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let normalized = entries
        .iter()
        .map(|(name, range)| format!("{}-{}", name, range))
        .collect::<Vec<String>>()
        .join("\n");

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn hash_order_independent() {
        let forward = map(&[("a", "1.0.0"), ("b", "2.0.0")]);

        let mut reversed = HashMap::new();
        reversed.insert("b".to_string(), "2.0.0".to_string());
        reversed.insert("a".to_string(), "1.0.0".to_string());

        assert_eq!(
            hash_dependency_map(&forward),
            hash_dependency_map(&reversed)
        );
    }

    #[test]
    fn hash_sensitive_to_range_change() {
        let before = map(&[("a", "1.0.0")]);
        let after = map(&[("a", "1.0.1")]);
        assert_ne!(hash_dependency_map(&before), hash_dependency_map(&after));
    }

    #[test]
    fn hash_sensitive_to_name_change() {
        let before = map(&[("a", "1.0.0")]);
        let after = map(&[("b", "1.0.0")]);
        assert_ne!(hash_dependency_map(&before), hash_dependency_map(&after));
    }

    #[test]
    fn hash_empty_map_fixed_value() {
        // SHA256 of the empty string
        assert_eq!(
            hash_dependency_map(&HashMap::new()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hash_known_answer() {
        // SHA256 over "react-^18.2.0\nreact-native-0.73.2"
        let deps = map(&[("react-native", "0.73.2"), ("react", "^18.2.0")]);
        assert_eq!(
            hash_dependency_map(&deps),
            "1669901d7b7216cf28d54b1f48c4d9e6acc2ff25cd92d5e173a3c16ebf427ac0"
        );
    }

    #[test]
    fn fingerprint_sections_independent() {
        let runtime = map(&[("react", "18.2.0")]);
        let dev = map(&[("typescript", "5.3.0")]);

        let base = DependencyFingerprint::compute(&runtime, &dev);
        let changed = DependencyFingerprint::compute(&map(&[("react", "18.3.0")]), &dev);

        assert_ne!(base.runtime, changed.runtime);
        assert_eq!(base.dev, changed.dev);
    }

    #[test]
    fn fingerprint_wire_format() {
        let fp = DependencyFingerprint::compute(&HashMap::new(), &HashMap::new());
        let json = serde_json::to_string(&fp).unwrap();
        assert!(json.contains("\"dependencies\""));
        assert!(json.contains("\"devDependencies\""));

        let parsed: DependencyFingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, fp);
    }
}

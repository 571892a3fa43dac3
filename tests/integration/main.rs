//! Integration tests for Podsync

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn podsync() -> Command {
        cargo_bin_cmd!("podsync")
    }

    /// Project with a package.json but no native subproject
    fn plain_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"name": "demo", "dependencies": {"react": "^18.2.0"}}"#,
        )
        .unwrap();
        temp
    }

    /// Project with a Podfile but no install artifacts
    fn native_project() -> TempDir {
        let temp = plain_project();
        let ios = temp.path().join("ios");
        std::fs::create_dir_all(&ios).unwrap();
        std::fs::write(ios.join("Podfile"), "platform :ios, '15.1'\n").unwrap();
        temp
    }

    #[test]
    fn help_displays() {
        podsync()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("CocoaPods sync"));
    }

    #[test]
    fn version_displays() {
        podsync()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("podsync"));
    }

    #[test]
    fn sync_skips_without_podfile() {
        let temp = plain_project();
        podsync()
            .args(["--no-local", "sync", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No Podfile"));
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn sync_reports_platform_restriction() {
        let temp = native_project();
        podsync()
            .args(["--no-local", "sync", "--yes", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("macOS"));
    }

    #[test]
    fn status_on_plain_project() {
        let temp = plain_project();
        podsync()
            .args(["--no-local", "status", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing for podsync to manage"));
    }

    #[test]
    fn status_on_uninstalled_native_project() {
        let temp = native_project();
        podsync()
            .args(["--no-local", "status", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("never installed"));
    }

    #[test]
    fn cache_info_without_record() {
        let temp = plain_project();
        podsync()
            .args(["--no-local", "cache", "info", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No fingerprint recorded"));
    }

    #[test]
    fn cache_clear_without_record() {
        let temp = plain_project();
        podsync()
            .args(["--no-local", "cache", "clear", "--yes", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No recorded fingerprint"));
    }

    /// Write a fingerprint record as `podsync sync` would have left it
    fn seed_record(temp: &TempDir, runtime: &str, dev: &str) -> std::path::PathBuf {
        let cache_dir = temp.path().join(".podsync");
        std::fs::create_dir_all(&cache_dir).unwrap();
        let cache_file = cache_dir.join("cached-packages.json");
        std::fs::write(
            &cache_file,
            format!(r#"{{"dependencies": "{runtime}", "devDependencies": "{dev}"}}"#),
        )
        .unwrap();
        cache_file
    }

    /// sha256 of `react-^18.2.0`, the runtime hash of `plain_project`
    const REACT_RUNTIME_HASH: &str =
        "b732916f66b7e643027b96ca0907bd13ec4155beec60f1dc2c767d4ef9417c1b";

    /// sha256 of the empty string, the hash of an absent devDependencies map
    const EMPTY_MAP_HASH: &str =
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn cache_clear_removes_record() {
        let temp = plain_project();
        let cache_file = seed_record(&temp, "abc", "def");

        podsync()
            .args(["--no-local", "cache", "clear", "--yes", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("cleared"));

        assert!(!cache_file.exists());
    }

    #[test]
    fn cache_clear_noninteractive_removes_record() {
        let temp = plain_project();
        let cache_file = seed_record(&temp, "abc", "def");

        // Piped stdio counts as unattended, so no confirmation is needed
        podsync()
            .args(["--no-local", "cache", "clear", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("cleared"));

        assert!(!cache_file.exists());
    }

    #[test]
    fn cache_info_reports_stale_record() {
        let temp = plain_project();
        seed_record(&temp, &"0".repeat(64), &"1".repeat(64));

        podsync()
            .args(["--no-local", "cache", "info", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(REACT_RUNTIME_HASH))
            .stdout(predicate::str::contains("stale"));
    }

    #[test]
    fn cache_info_reports_current_record() {
        let temp = plain_project();
        seed_record(&temp, REACT_RUNTIME_HASH, EMPTY_MAP_HASH);

        podsync()
            .args(["--no-local", "cache", "info", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Fingerprint is current"))
            .stdout(predicate::str::contains("skip pod install"));
    }

    #[test]
    fn init_creates_local_config() {
        let temp = TempDir::new().unwrap();
        podsync()
            .args(["init", "--path"])
            .arg(temp.path())
            .assert()
            .success();

        assert!(temp.path().join(".podsync.toml").is_file());
    }

    #[test]
    fn init_refuses_existing_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".podsync.toml"), "").unwrap();

        podsync()
            .args(["init", "--path"])
            .arg(temp.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let temp = plain_project();
        let config = temp.path().join("broken.toml");
        std::fs::write(&config, "not [ valid toml").unwrap();

        podsync()
            .arg("--no-local")
            .arg("-c")
            .arg(&config)
            .args(["status", "--project"])
            .arg(temp.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn local_config_overrides_native_dir() {
        let temp = plain_project();
        std::fs::write(
            temp.path().join(".podsync.toml"),
            "[project]\nnative_dir = \"macos\"\n",
        )
        .unwrap();
        let native = temp.path().join("macos");
        std::fs::create_dir_all(&native).unwrap();
        std::fs::write(native.join("Podfile"), "").unwrap();

        podsync()
            .current_dir(temp.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("macos"));
    }
}

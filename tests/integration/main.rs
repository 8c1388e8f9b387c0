//! Integration tests for statcard

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    const ENV_VARS: &[&str] = &[
        "GITHUB_USERNAME",
        "API_TOKEN",
        "SALT",
        "FLUSH_CACHE",
        "CACHE_FILE",
        "OUTPUT_FILE",
        "STATCARD_CONFIG",
        "RUST_LOG",
    ];

    /// Binary isolated from the caller's environment and config file
    fn statcard(config_dir: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("statcard");
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.arg("--config").arg(config_dir.join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        statcard(temp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("GitHub activity stats"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        statcard(temp.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("statcard"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        statcard(temp.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        statcard(temp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[github]"))
            .stdout(predicate::str::contains("Jupyter Notebook"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.toml"), "[github\n").unwrap();
        statcard(temp.path())
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn cache_info_missing_file() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache.json");
        statcard(temp.path())
            .args(["cache", "info", "--cache-file"])
            .arg(&cache)
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache file found"));
    }

    #[test]
    fn cache_info_reads_legacy_cache_from_env() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache.json");
        std::fs::write(
            &cache,
            r#"{"edges":{"abc":{"additions":12,"deletions":2,"commits":3,"totalCommits":5}},"languages":{"Rust":900,"Python":100}}"#,
        )
        .unwrap();

        statcard(temp.path())
            .env("CACHE_FILE", &cache)
            .args(["cache", "info"])
            .assert()
            .success()
            .stdout(predicate::str::contains("repositories: 1"))
            .stdout(predicate::str::contains("commits: 3"))
            .stdout(predicate::str::contains("Rust"));
    }

    #[test]
    fn cache_info_rejects_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache.json");
        std::fs::write(&cache, "not json").unwrap();

        statcard(temp.path())
            .args(["cache", "info", "--cache-file"])
            .arg(&cache)
            .assert()
            .failure()
            .stderr(predicate::str::contains("unreadable"));
    }

    #[test]
    fn cache_clear_with_yes() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache.json");
        std::fs::write(&cache, "{}").unwrap();

        statcard(temp.path())
            .args(["cache", "clear", "--yes", "--cache-file"])
            .arg(&cache)
            .assert()
            .success();

        assert!(!cache.exists());
    }

    #[test]
    fn generate_requires_username() {
        let temp = TempDir::new().unwrap();
        statcard(temp.path())
            .args(["generate", "--token", "t"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Missing required setting: username"))
            .stderr(predicate::str::contains("GITHUB_USERNAME"));
    }

    #[test]
    fn generate_requires_token() {
        let temp = TempDir::new().unwrap();
        statcard(temp.path())
            .env("GITHUB_USERNAME", "octocat")
            .arg("generate")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Missing required setting: token"));
    }

    #[test]
    fn generate_unreachable_endpoint_fails_without_output() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            "[github]\nendpoint = \"http://127.0.0.1:9/graphql\"\ntimeout_secs = 2\n",
        )
        .unwrap();
        let output = temp.path().join("out/cover.svg");

        statcard(temp.path())
            .args(["generate", "--username", "octocat", "--token", "t", "--output"])
            .arg(&output)
            .arg("--cache-file")
            .arg(temp.path().join("cache.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));

        assert!(!output.exists());
    }
}

//! Integration tests for the altsite binary.
//!
//! Every test pins its working directory to a temp dir and strips FTP_*
//! variables, so ambient credentials or a stray `.env` cannot leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn altsite(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("altsite").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("FTP_SERVER")
        .env_remove("FTP_HOST")
        .env_remove("FTP_USER")
        .env_remove("FTP_PASS")
        .env_remove("RUST_LOG");
    cmd
}

fn site_workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("index.html"),
        "<a href=\"https://findtorontoevents.ca\">home</a>",
    )
    .unwrap();
    std::fs::create_dir_all(dir.path().join("stats")).unwrap();
    std::fs::write(dir.path().join("stats/index.php"), "<?php ?>").unwrap();
    dir
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("altsite"));
}

#[test]
fn no_subcommand_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir).assert().code(2);
}

#[test]
fn unknown_flag_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .args(["deploy", "--bogus"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn dry_run_needs_no_credentials() {
    let workspace = site_workspace();
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .args([
            "deploy",
            "--dry-run",
            "--no-color",
            "-C",
            workspace.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Main site index"))
        .stdout(predicate::str::contains("Stats dashboard"))
        .stdout(predicate::str::contains("nothing uploaded"));
}

#[test]
fn dry_run_reports_rewrites() {
    let workspace = site_workspace();
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .args([
            "deploy",
            "--dry-run",
            "--no-color",
            "-C",
            workspace.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 rewritten"));
}

#[test]
fn publish_without_credentials_exits_four() {
    let workspace = site_workspace();
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .args(["deploy", "-C", workspace.path().to_str().unwrap()])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("FTP_SERVER"));
}

#[test]
fn missing_workspace_exits_three() {
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .args(["deploy", "--dry-run", "-C", "/no/such/workspace"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("workspace"));
}

#[test]
fn equal_source_and_target_exits_two() {
    let workspace = site_workspace();
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .args([
            "deploy",
            "--dry-run",
            "--source",
            "same.ca",
            "--target",
            "same.ca",
            "-C",
            workspace.path().to_str().unwrap(),
        ])
        .assert()
        .code(2);
}

#[test]
fn plan_lists_present_components_only() {
    let workspace = site_workspace();
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .args([
            "plan",
            "--no-color",
            "-C",
            workspace.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Main site index"))
        .stdout(predicate::str::contains("2 of"))
        .stdout(predicate::str::contains("FindStocks").not());
}

#[test]
fn plan_all_includes_missing_components() {
    let workspace = site_workspace();
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .args([
            "plan",
            "--all",
            "--no-color",
            "-C",
            workspace.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("FindStocks"))
        .stdout(predicate::str::contains("missing"));
}

#[test]
fn custom_config_overrides_manifest() {
    let workspace = site_workspace();
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("altsite.toml");
    std::fs::write(
        &config,
        r#"
        [identities]
        source = "findtorontoevents.ca"
        target = "tdotevent.ca"

        [[components]]
        source = "stats"
        dest = "stats"
        label = "Only stats"
        "#,
    )
    .unwrap();

    altsite(&dir)
        .args([
            "plan",
            "--no-color",
            "--config",
            config.to_str().unwrap(),
            "-C",
            workspace.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Only stats"))
        .stdout(predicate::str::contains("Main site index").not());
}

#[test]
fn broken_config_exits_four() {
    let workspace = site_workspace();
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("broken.toml");
    std::fs::write(&config, "this is not toml [").unwrap();

    altsite(&dir)
        .args([
            "plan",
            "--config",
            config.to_str().unwrap(),
            "-C",
            workspace.path().to_str().unwrap(),
        ])
        .assert()
        .code(4);
}

#[test]
fn completions_emit_bash_script() {
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("altsite"));
}

#[test]
fn keep_staging_survives_connection_failure() {
    let workspace = site_workspace();
    let dir = tempfile::tempdir().unwrap();
    let staging_home = tempfile::tempdir().unwrap();

    // Port 1 refuses the connection, so the run dies at the login preflight.
    altsite(&dir)
        .env("TMPDIR", staging_home.path())
        .env("FTP_SERVER", "127.0.0.1:1")
        .env("FTP_USER", "deploy")
        .env("FTP_PASS", "pw")
        .args([
            "deploy",
            "--keep-staging",
            "--no-color",
            "-C",
            workspace.path().to_str().unwrap(),
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Staging kept at"));

    let retained = std::fs::read_dir(staging_home.path())
        .unwrap()
        .filter_map(Result::ok)
        .any(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("altsite-staging-")
        });
    assert!(retained, "staging directory should outlive the failed run");
}

#[test]
fn keep_staging_prints_the_path() {
    let workspace = site_workspace();
    let dir = tempfile::tempdir().unwrap();
    altsite(&dir)
        .args([
            "deploy",
            "--dry-run",
            "--keep-staging",
            "--no-color",
            "-C",
            workspace.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Staging kept at"));
}

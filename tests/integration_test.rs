use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn ghrm() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("ghrm"));
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("GHRM_CONFIG")
        .env("RUST_LOG", "info");
    cmd
}

#[test]
fn test_version_flag() {
    ghrm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ghrm "));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempdir().unwrap();

    ghrm()
        .arg("--config")
        .arg(dir.path().join("absent.txt"))
        .arg("--log-file")
        .arg(dir.path().join("ghrm.log"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot open config file"));
}

#[test]
fn test_config_without_token_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.txt");
    fs::write(&config, "# repos\nowner/repo\n").unwrap();

    ghrm()
        .arg("--config")
        .arg(&config)
        .arg("--log-file")
        .arg(dir.path().join("ghrm.log"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("PAT token is empty"));
}

#[test]
fn test_config_without_repos_fails_and_logs_skipped_lines() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.txt");
    let log = dir.path().join("ghrm.log");
    fs::write(&config, "pat=abc\nnot-a-repo\n").unwrap();

    ghrm()
        .env("GHRM_CONFIG", &config)
        .arg("--log-file")
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No repositories configured"));

    let logged = fs::read_to_string(&log).unwrap();
    assert!(logged.contains("Invalid line 2 in config"));
}

//! Exit codes and suggestions for failures.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn aspgen(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aspgen").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("ASPGEN_TEMPLATES_DIR")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn unknown_generator_lists_available() {
    let dir = TempDir::new().unwrap();
    aspgen(&dir)
        .args(["generate", "bogus"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown generator 'bogus'"))
        .stderr(predicate::str::contains("Available generators"))
        .stderr(predicate::str::contains("dockerfile"));
}

#[test]
fn missing_name_argument_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    aspgen(&dir)
        .args(["generate", "class"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("precondition failed"));
}

#[test]
fn unsupported_flag_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    aspgen(&dir)
        .args(["generate", "program", "--sqlite"])
        .assert()
        .code(2);
}

#[test]
fn conflict_fail_keeps_existing_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("README.md"), "mine").unwrap();

    aspgen(&dir)
        .args(["generate", "--conflict", "fail", "readme"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(std::fs::read_to_string(dir.path().join("README.md")).unwrap(), "mine");
}

#[test]
fn unknown_app_kind_is_rejected_by_the_parser() {
    let dir = TempDir::new().unwrap();
    aspgen(&dir)
        .args(["new", "winforms", "app"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("winforms"));
}

#[test]
fn missing_explicit_config_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    aspgen(&dir)
        .args(["--config", "does-not-exist.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unknown_config_key() {
    let dir = TempDir::new().unwrap();
    aspgen(&dir)
        .args(["config", "get", "defaults.language"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown config key"))
        .stderr(predicate::str::contains("aspgen config list"));
}

#[test]
fn verbose_shows_causes() {
    let dir = TempDir::new().unwrap();
    aspgen(&dir)
        .args(["-v", "--config", "does-not-exist.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Caused by"))
        .stderr(predicate::str::contains("--verbose").not());
}

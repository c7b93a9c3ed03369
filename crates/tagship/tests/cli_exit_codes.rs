//! Exit code tests for the tagship binary.
//!
//! Every case fails validation, so none of them reach the network.

use assert_cmd::Command;
use predicates::prelude::*;

fn tagship() -> Command {
    let mut cmd = Command::cargo_bin("tagship").unwrap();
    cmd.env_clear().env("RUST_LOG", "off");
    cmd
}

#[test]
fn missing_token_exits_with_config_error() {
    tagship()
        .args(["--files", "dist/*", "--tag", "v1.0.0"])
        .args(["--repository", "owner/app"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("GitHub token is required"));
}

#[test]
fn blank_files_exit_with_config_error() {
    tagship()
        .env("INPUT_TOKEN", "test-token")
        .env("INPUT_FILES", "  \n  ")
        .args(["--repository", "owner/app"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No file patterns provided"));
}

#[test]
fn missing_repository_exits_with_config_error() {
    tagship()
        .args(["--files", "dist/*", "--token", "test-token"])
        .args(["--tag", "v1.0.0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Repository is required"));
}

#[test]
fn malformed_repository_exits_with_config_error() {
    tagship()
        .env("GITHUB_REPOSITORY", "owner/app/extra")
        .args(["--files", "dist/*", "--token", "test-token"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid repository"));
}

#[test]
fn malformed_api_url_exits_with_config_error() {
    tagship()
        .args(["--files", "dist/*", "--token", "test-token"])
        .args(["--repository", "owner/app"])
        .args(["--api-url", "not a url"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid API URL"));
}

#[test]
fn json_mode_prints_error_envelope() {
    tagship()
        .args(["--files", "dist/*", "--repository", "owner/app", "--json"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(r#""status":"error""#))
        .stdout(predicate::str::contains(r#""code":"config""#));
}

#[test]
fn actions_format_reports_the_error_once_as_annotation() {
    tagship()
        .args(["--files", "dist/*", "--repository", "owner/app"])
        .args(["--log-format", "actions"])
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with(
            "::error::Configuration error: GitHub token is required",
        ))
        .stdout(predicate::str::contains("token is required").count(1))
        .stderr(predicate::str::contains("token is required").not());
}

#[test]
fn help_lists_inputs() {
    tagship()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--homebrew-formula"))
        .stdout(predicate::str::contains("--repository"));
}

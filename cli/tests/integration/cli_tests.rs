//! End-to-end tests of the `gecos-assistant` binary.
//!
//! Every test points the binary at a private configuration file whose
//! link record lives in a temporary directory, so nothing touches `/etc`.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn assistant() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gecos-assistant"));
    cmd.env("NO_COLOR", "1")
        .env_remove("GECOS_ASSISTANT_CONFIG")
        .env_remove("GECOS_CC_URL")
        .env_remove("GECOS_CC_LOGIN")
        .env_remove("GECOS_CC_PASSWORD")
        .env_remove("GECOS_CERT_URL");
    cmd
}

/// Temporary config whose link record is `<dir>/gcc.control`.
struct Sandbox {
    dir: TempDir,
    config: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("config.yaml");
        let yaml = format!(
            "paths:\n  access_data: {}\n  validation_certificate: {}\n",
            dir.path().join("gcc.control").display(),
            dir.path().join("validation.pem").display(),
        );
        std::fs::write(&config, yaml).expect("write config");
        Self { dir, config }
    }

    fn record_path(&self) -> PathBuf {
        self.dir.path().join("gcc.control")
    }

    fn write_record(&self) {
        std::fs::write(
            self.record_path(),
            r#"{
                "uri": "https://cc.example.org",
                "gcc_username": "admin",
                "gcc_nodename": "node-7",
                "gcc_workstation_name": "ws-01",
                "gcc_ou": "Madrid",
                "gcc_link": true,
                "linked_at": "2026-03-01T12:00:00Z"
            }"#,
        )
        .expect("write record");
    }

    fn cmd(&self) -> Command {
        let mut cmd = assistant();
        cmd.arg("--config").arg(&self.config);
        cmd
    }
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help() {
    assistant().assert().code(2).stderr(predicate::str::contains(
        "Link a workstation to a GECOS Control Center",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    assistant()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("connect"))
        .stdout(predicate::str::contains("disconnect"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_version_command_shows_version() {
    assistant()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "gecos-assistant {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_json_is_valid() {
    let output = assistant()
        .args(["version", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_unknown_subcommand_fails() {
    assistant()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// --- Config ---

#[test]
fn test_config_path_follows_env_var() {
    let sandbox = Sandbox::new();
    assistant()
        .env("GECOS_ASSISTANT_CONFIG", &sandbox.config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            sandbox.config.display().to_string(),
        ));
}

#[test]
fn test_config_flag_wins_over_env_var() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("GECOS_ASSISTANT_CONFIG", "/nonexistent/config.yaml")
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            sandbox.config.display().to_string(),
        ));
}

#[test]
fn test_config_show_json_merges_defaults() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["config", "show", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let doc = json_stdout(&output);
    assert_eq!(
        doc["config"]["paths"]["access_data"],
        sandbox.record_path().display().to_string()
    );
    assert_eq!(doc["config"]["paths"]["client_config"], "/etc/chef/client.rb");
    assert_eq!(doc["config"]["commands"]["timeout_secs"], 300);
}

#[test]
fn test_invalid_config_is_reported() {
    let sandbox = Sandbox::new();
    std::fs::write(&sandbox.config, "ownership:\n  secure_mode: \"rw-------\"\n")
        .expect("write config");
    sandbox
        .cmd()
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("config.yaml"));
}

// --- Status ---

#[test]
fn test_status_without_record_is_not_linked() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("not linked"));
}

#[test]
fn test_status_reads_link_record() {
    let sandbox = Sandbox::new();
    sandbox.write_record();
    let output = sandbox
        .cmd()
        .args(["status", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let doc = json_stdout(&output);
    assert_eq!(doc["status"], "linked");
    assert_eq!(doc["node_name"], "node-7");
    assert_eq!(doc["url"], "https://cc.example.org");
}

// --- Connect / disconnect validation ---

#[test]
fn test_connect_json_without_url_fails_credentials_step() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["connect", "--json", "--login", "admin", "--password", "secret"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let doc = json_stdout(&output);
    assert_eq!(doc["direction"], "connect");
    assert_eq!(doc["outcome"], "failed");
    assert_eq!(doc["step"], "check_credentials");
    assert_eq!(doc["error"]["code"], "validation");
    assert_eq!(doc["error"]["field"], "--url");
    assert_eq!(doc["steps"][0]["status"], "error");
    assert_eq!(doc["steps"][1]["status"], "pending");
    assert!(!sandbox.record_path().exists());
}

#[test]
fn test_connect_malformed_url_suggests_flag() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args([
            "connect", "--yes", "--url", "not a url", "--login", "admin", "--password", "secret",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✗ Check GECOS credentials"))
        .stderr(predicate::str::contains("Malformed URL"))
        .stderr(predicate::str::contains("Set it with --url"));
}

#[test]
fn test_disconnect_uses_record_but_still_needs_password() {
    let sandbox = Sandbox::new();
    sandbox.write_record();
    let output = sandbox
        .cmd()
        .args(["disconnect", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let doc = json_stdout(&output);
    assert_eq!(doc["direction"], "disconnect");
    assert_eq!(doc["error"]["field"], "--password");
    assert!(sandbox.record_path().exists());
}

#[test]
fn test_ou_search_without_access_data_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["ou", "search", "Madrid", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("URL field is empty"));
}

#[test]
fn test_json_errors_are_json() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["ou", "search", "Madrid", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let doc = json_stdout(&output);
    assert_eq!(doc["error"], true);
}


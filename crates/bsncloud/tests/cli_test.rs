//! Integration tests for the `bsncloud` CLI binary.
//!
//! Argument parsing, completions and error exit codes run without a
//! server; the end-to-end cases point the binary at a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `bsncloud` binary with env isolation.
///
/// Clears all `BSN_*` env vars and points config directories at
/// `config_home` so tests never touch the user's real configuration.
fn bsn_cmd_in(config_home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("bsncloud");
    cmd.env("HOME", config_home)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG");
    for var in [
        "BSN_PROFILE",
        "BSN_NETWORK",
        "BSN_CLIENT_ID",
        "BSN_CLIENT_SECRET",
        "BSN_BASE_URL",
        "BSN_TOKEN_URL",
        "BSN_OUTPUT",
        "BSN_TIMEOUT",
        "BSN_DEFAULT_PROFILE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn bsn_cmd() -> assert_cmd::Command {
    bsn_cmd_in(Path::new("/tmp/bsncloud-cli-test-nonexistent"))
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn server_args(server: &MockServer) -> Vec<String> {
    vec![
        "--client-id".into(),
        "cli-client".into(),
        "--client-secret".into(),
        "cli-secret".into(),
        "--base-url".into(),
        format!("{}/v1", server.uri()),
        "--token-url".into(),
        format!("{}/token", server.uri()),
    ]
}

async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "cli-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/self/session/network"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

async fn mount_devices(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/Devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": 11,
                    "serial": "XTD41N000011",
                    "model": "XT1144",
                    "settings": {
                        "name": "Lobby",
                        "network": {"interfaces": [{
                            "type": "WiFi",
                            "name": "wlan0",
                            "ssid": "lobby-guest",
                            "security": {"authentication": {"mode": "WPA2", "passphrase": "wifi-hunter2"}}
                        }]},
                        "lws": {"username": "admin", "password": "lws-s3cret"}
                    },
                    "status": {"health": "Normal", "firmware": {"version": "8.5.47"}}
                },
                {"id": 12, "serial": "HD4N000012", "model": "HD224"}
            ]
        })))
        .mount(server)
        .await;
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = bsn_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    bsn_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("BSN.cloud")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("networks"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    bsn_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bsncloud"));
}

#[test]
fn test_client_secret_env_value_hidden_from_help() {
    bsn_cmd()
        .env("BSN_CLIENT_SECRET", "do-not-print")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("do-not-print").not());
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    bsn_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    bsn_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = bsn_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_devices_list_without_credentials() {
    bsn_cmd()
        .args(["devices", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No client id configured"));
}

#[test]
fn test_devices_list_without_secret() {
    bsn_cmd()
        .args(["devices", "list", "--client-id", "abc"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No client secret"));
}

#[test]
fn test_unknown_profile() {
    bsn_cmd()
        .args(["--profile", "nope", "devices", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Profile 'nope' not found"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    bsn_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_show_masks_secret() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("bsncloud");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        r#"
default_profile = "lab"

[profiles.lab]
client_id = "lab-client"
client_secret = "hunter2"
network = "Lab"
"#,
    )
    .unwrap();

    bsn_cmd_in(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[profiles.lab]")
                .and(predicate::str::contains("network = \"Lab\""))
                .and(predicate::str::contains("hunter2").not()),
        );

    bsn_cmd_in(home.path())
        .args(["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2").not());
}

// ── Against a mock server ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_list_json() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    mount_devices(&server).await;

    let mut cmd = bsn_cmd();
    cmd.args(["devices", "list", "-o", "json", "--network", "Retail"])
        .args(server_args(&server));
    let output = run_blocking(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let players: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(players.as_array().unwrap().len(), 2);
    assert_eq!(players[0]["serial"], "XTD41N000011");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lobby-guest"));
    assert!(!stdout.contains("wifi-hunter2"), "{stdout}");
    assert!(!stdout.contains("lws-s3cret"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_list_table() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    mount_devices(&server).await;

    let mut cmd = bsn_cmd();
    cmd.args(["devices", "list", "--network", "Retail"])
        .args(server_args(&server));
    let output = run_blocking(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Serial"));
    assert!(stdout.contains("Lobby"));
    assert!(stdout.contains("HD4N000012"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_list_requires_network() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    let mut cmd = bsn_cmd();
    cmd.args(["devices", "list"]).args(server_args(&server));
    let output = run_blocking(cmd).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("No network selected"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_get_unknown_serial() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    mount_devices(&server).await;

    let mut cmd = bsn_cmd();
    cmd.args(["devices", "get", "NOPE", "--network", "Retail"])
        .args(server_args(&server));
    let output = run_blocking(cmd).await;
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("device 'NOPE' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_get_detail() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    mount_devices(&server).await;

    let mut cmd = bsn_cmd();
    cmd.args(["devices", "get", "xtd41n000011", "--network", "Retail"])
        .args(server_args(&server));
    let output = run_blocking(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Name:         Lobby"));
    assert!(stdout.contains("Firmware:     8.5.47"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_token_rejection_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .mount(&server)
        .await;

    let mut cmd = bsn_cmd();
    cmd.args(["networks", "list"]).args(server_args(&server));
    let output = run_blocking(cmd).await;
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("invalid_client"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_networks_list_plain() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1, "name": "Retail"}, {"id": 2, "name": "Lab"}]
        })))
        .mount(&server)
        .await;

    let mut cmd = bsn_cmd();
    cmd.args(["networks", "list", "-o", "plain"])
        .args(server_args(&server));
    let output = run_blocking(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Retail\nLab\n");
}

//! CLI tests against a mock CheetahMail service.
//!
//! Each run gets its own HOME and XDG config directory so that a real
//! user config file never leaks into the tests.

use std::path::Path;
use std::process::{Command, Output};

use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the CLI binary with an isolated environment.
fn run_cli(args: &[&str], home: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cheetah"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    for var in [
        "CHEETAH_CONFIG",
        "CHEETAH_HOST",
        "CHEETAH_USERNAME",
        "CHEETAH_PASSWORD",
        "CHEETAH_AID",
        "CHEETAH_DISABLE_TRACKING",
        "CHEETAH_ENABLE_TRACKING",
        "CHEETAH_WHITELIST_FILTER",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so the mock server keeps serving.
async fn run_cli_async(args: Vec<String>, home: &Path) -> Output {
    let home = home.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &home)
    })
    .await
    .expect("CLI task panicked")
}

fn connection_args(server: &MockServer) -> Vec<String> {
    vec![
        "--host".to_string(),
        format!("http://127.0.0.1:{}", server.address().port()),
        "--username".to_string(),
        "foo_user".to_string(),
        "--password".to_string(),
        "foo".to_string(),
        "--aid".to_string(),
        "123".to_string(),
    ]
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/login1"))
        .and(body_string("name=foo_user&cleartext=foo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("OK\r\n")
                .insert_header("set-cookie", "token"),
        )
        .mount(server)
        .await;
}

fn with_command(mut args: Vec<String>, command: &[&str]) -> Vec<String> {
    args.extend(command.iter().map(|s| s.to_string()));
    args
}

#[test]
fn test_help() {
    let home = tempfile::tempdir().unwrap();
    let output = run_cli(&["--help"], home.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("send-email"));
    assert!(stdout.contains("update-subscriber"));
}

#[test]
fn test_missing_configuration_is_reported() {
    let home = tempfile::tempdir().unwrap();
    let output = run_cli(&["login"], home.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing required option 'host'"), "stderr: {stderr}");
}

#[test]
fn test_config_reads_default_file_and_hides_password() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join("config").join("cheetah");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        r#"{"host":"foo.com","username":"foo_user","password":"s3cret","aid":"123"}"#,
    )
    .unwrap();

    let output = run_cli(&["config"], home.path());

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["host"], "foo.com");
    assert_eq!(config["aid"], "123");
    assert!(!stdout.contains("s3cret"));
    assert_eq!(config["enable_tracking"], serde_json::Value::Null);
    assert_eq!(config["tracking_disabled"], false);
}

#[test]
fn test_config_shows_enable_tracking_from_env() {
    let home = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_cheetah"))
        .args(["--host", "foo.com", "--username", "u", "--password", "p", "--aid", "1", "config"])
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("CHEETAH_DISABLE_TRACKING")
        .env_remove("CHEETAH_CONFIG")
        .env("CHEETAH_ENABLE_TRACKING", "false")
        .output()
        .expect("Failed to execute CLI");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["enable_tracking"], false);
    assert_eq!(config["disable_tracking"], false);
    assert_eq!(config["tracking_disabled"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_email() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/ebm/ebmtrigger1"))
        .and(body_string("eid=foo&email=foo%40bar.baz&FNAME=Ada&aid=123"))
        .and(header("cookie", "token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK\r\n"))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let args = with_command(
        connection_args(&server),
        &["send-email", "--eid", "foo", "--email", "foo@bar.baz", "-p", "FNAME=Ada"],
    );
    let output = run_cli_async(args, home.path()).await;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Triggered 'foo'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_subscriber_with_tracking_disabled() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/setuser1"))
        .and(body_string("sub=123&email=foo%40bar.baz&aid=123&test=1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK\r\n"))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let args = with_command(
        connection_args(&server),
        &[
            "--disable-tracking",
            "update-subscriber",
            "--email",
            "foo@bar.baz",
            "--param",
            "sub=123",
        ],
    );
    let output = run_cli_async(args, home.path()).await;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whitelist_suppresses_change_email() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK\r\n"))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let args = with_command(
        connection_args(&server),
        &[
            "--whitelist-filter",
            r"@test\.com$",
            "change-email",
            "--from",
            "foo@bar.baz",
            "--to",
            "foo2@bar.baz",
        ],
    );
    let output = run_cli_async(args, home.path()).await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Suppressed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_temporary_failure_exits_with_tempfail() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/setuser1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("err:internal error\r\n"))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let args = with_command(
        connection_args(&server),
        &["post", "/api/setuser1", "-p", "email=foo@bar.baz"],
    );
    let output = run_cli_async(args, home.path()).await;

    assert_eq!(output.status.code(), Some(75));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("temporary error"), "stderr: {stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_credentials_fail_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("err:authentication error\r\n"))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let args = with_command(connection_args(&server), &["login"]);
    let output = run_cli_async(args, home.path()).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("authorization exception while logging in"), "stderr: {stderr}");
}

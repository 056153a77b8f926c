//! CLI behavior of the plotdash binary that does not need a terminal.

use std::fs;

use assert_cmd::Command;

fn plotdash(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("plotdash").expect("plotdash binary");
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

#[test]
fn test_help_mentions_short_and_long_flags() {
    let td = tempfile::tempdir().unwrap();
    let output = plotdash(td.path()).arg("--help").output().expect("run plotdash --help");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(
        text.contains("--backend") && text.contains("-b") && text.contains("--config") && text.contains("-c"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn test_missing_config_is_fatal_before_terminal_setup() {
    let td = tempfile::tempdir().unwrap();
    let output = plotdash(td.path())
        .args(["--config", "/nonexistent/plotdash.yaml"])
        .arg("--log-file")
        .arg(td.path().join("p.log"))
        .output()
        .expect("run plotdash");
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("config file not found"), "{err}");
}

#[test]
fn test_invalid_config_is_fatal() {
    let td = tempfile::tempdir().unwrap();
    let cfg = td.path().join("plotdash.yaml");
    fs::write(&cfg, "directories:\n  log: /logs\n  tmp: []\n").unwrap();
    let output = plotdash(td.path())
        .arg("-c")
        .arg(&cfg)
        .arg("--log-file")
        .arg(td.path().join("p.log"))
        .output()
        .expect("run plotdash");
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("invalid configuration"), "{err}");
    let log = fs::read_to_string(td.path().join("p.log")).unwrap();
    assert!(log.contains("bad configuration"), "{log}");
}

#[test]
fn test_unopenable_log_file_is_not_fatal() {
    let td = tempfile::tempdir().unwrap();
    let cfg = td.path().join("plotdash.yaml");
    fs::write(&cfg, "directories:\n  log: logs\n  tmp: [/t]\n").unwrap();
    // a directory cannot be opened as the log file
    let output = plotdash(td.path())
        .arg("-c")
        .arg(&cfg)
        .arg("--log-file")
        .arg(td.path())
        .output()
        .expect("run plotdash");
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("continuing without logging"), "{err}");
    // startup went on to load the configuration
    assert!(err.contains("must be an absolute path"), "{err}");
}

#[test]
fn test_unknown_backend_is_a_usage_error() {
    let td = tempfile::tempdir().unwrap();
    plotdash(td.path())
        .args(["--backend", "threads"])
        .assert()
        .code(2);
}

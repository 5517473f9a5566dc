//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway home directory and verify
//! outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_waterbuddy"))
        .args(args)
        .env("WATERBUDDY_HOME", home)
        .env_remove("WATERBUDDY_ENV")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).expect("Failed to write stdin");
        }
    }

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_catalog_lists_age_groups() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["catalog"], None);
    assert_eq!(code, 0, "catalog failed");
    assert!(stdout.contains("Adults (14-64 years)"));
    assert!(stdout.contains("2200 ml"));
    assert!(stdout.contains("1 cup = 240 ml"));
}

#[test]
fn test_catalog_json() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["catalog", "--json"], None);
    assert_eq!(code, 0, "catalog --json failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["age_groups"].as_array().unwrap().len(), 4);
    assert_eq!(parsed["age_groups"][0]["standard_goal_ml"], 1200);
    assert_eq!(parsed["cup_ml"], 240);
}

#[test]
fn test_tip_for_date_is_stable() {
    let home = tempfile::tempdir().unwrap();
    let (first, _, code) = run_cli(home.path(), &["tip", "--date", "2025-11-24"], None);
    assert_eq!(code, 0, "tip failed");
    let (second, _, _) = run_cli(home.path(), &["tip", "--date", "2025-11-24"], None);
    assert_eq!(first, second);
    let (five_later, _, _) = run_cli(home.path(), &["tip", "--date", "2025-11-29"], None);
    assert_eq!(first, five_later);
}

#[test]
fn test_config_set_get_roundtrip() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "display.unit", "cups"], None);
    assert_eq!(code, 0, "config set failed");
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "display.unit"], None);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "cups");
    assert!(home.path().join(".config/waterbuddy/config.toml").exists());
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "display.colour", "blue"], None);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_reset() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["config", "set", "tips.mode", "random"], None);
    let (_, _, code) = run_cli(home.path(), &["config", "reset"], None);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "tips.mode"], None);
    assert_eq!(stdout.trim(), "stable");
}

#[test]
fn test_shell_session_end_to_end() {
    let home = tempfile::tempdir().unwrap();
    let script = "start\nselect adults\nconfirm\nadd 250\nadd 250\nadd 250\nadd 250\nstatus\nsummary\nnew-day\nlog\nquit\n";
    let (stdout, _, code) = run_cli(home.path(), &["shell"], Some(script));
    assert_eq!(code, 0, "shell failed");
    assert!(stdout.contains("+250 ml (total 1000 ml)"));
    assert!(stdout.contains("Nice start! Let's keep going!"));
    assert!(stdout.contains("Goal progress: 45% of 2200 ml"));
    assert!(stdout.contains("New day started (4 entries cleared)"));
    assert!(stdout.contains("No water logged yet today."));
}

#[test]
fn test_shell_uses_configured_unit() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["config", "set", "display.unit", "cups"], None);
    let script = "start\nselect teens\nconfirm\n";
    let (stdout, _, code) = run_cli(home.path(), &["shell"], Some(script));
    assert_eq!(code, 0);
    assert!(stdout.contains("Quick add: 1.04 cups"));
}

#[test]
fn test_shell_json_snapshot() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["shell", "--json"], Some("status\n"));
    assert_eq!(code, 0);
    let last: serde_json::Value = serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(last["snapshot"]["phase"], "welcome");
    assert_eq!(last["snapshot"]["progress"]["fraction"], 0.0);
}

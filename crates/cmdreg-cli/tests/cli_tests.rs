//! Integration tests for the cmdreg binary
//!
//! Each test points the binary at a fresh data directory and runs it the
//! way a user would.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn cmdreg(dir: &Path, tenant: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cmdreg"))
        .arg("--config")
        .arg(dir.join("missing.toml"))
        .arg("--data-dir")
        .arg(dir.join("db"))
        .args(["--tenant", tenant])
        .args(args)
        .env_remove("CMDREG_CONFIG")
        .env_remove("CMDREG_TENANT")
        .env_remove("CMDREG_DATA_DIR")
        .env_remove("CMDREG_STORAGE_BACKEND")
        .env_remove("CMDREG_SEPARATOR")
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run cmdreg")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_add_then_run() {
    let dir = TempDir::new().unwrap();

    let added = cmdreg(dir.path(), "g1", &["add", "greet", "Hello, {}!"]);
    assert!(added.status.success());

    let ran = cmdreg(dir.path(), "g1", &["run", "greet", "Bot"]);
    assert!(ran.status.success());
    assert_eq!(stdout(&ran).trim(), "Hello, Bot!");
}

#[test]
fn test_global_command_is_shared() {
    let dir = TempDir::new().unwrap();

    assert!(cmdreg(dir.path(), "g1", &["add", "rules", "Be nice"]).status.success());
    let other = cmdreg(dir.path(), "g2", &["run", "rules"]);
    assert!(!other.status.success());

    assert!(cmdreg(dir.path(), "g1", &["global", "rules"]).status.success());
    let other = cmdreg(dir.path(), "g2", &["run", "rules"]);
    assert!(other.status.success());
    assert_eq!(stdout(&other).trim(), "Be nice");
}

#[test]
fn test_nested_commands_and_list() {
    let dir = TempDir::new().unwrap();

    assert!(cmdreg(dir.path(), "g1", &["group", "fun"]).status.success());
    assert!(
        cmdreg(dir.path(), "g1", &["add", "fun hug", "*hugs {}*", "--brief", "Hug someone"])
            .status
            .success()
    );

    let ran = cmdreg(dir.path(), "g1", &["run", "fun", "hug", "Bot"]);
    assert_eq!(stdout(&ran).trim(), "*hugs Bot*");

    let removed = cmdreg(dir.path(), "g1", &["rm", "fun"]);
    assert!(!removed.status.success());

    let listed = stdout(&cmdreg(dir.path(), "g1", &["list"]));
    assert!(listed.contains("fun"));
    assert!(listed.contains("hug"));
    assert!(listed.contains("Hug someone"));
}

#[test]
fn test_permission_level_gates_run() {
    let dir = TempDir::new().unwrap();

    assert!(cmdreg(dir.path(), "g1", &["add", "stats", "{} members", "--level", "admin"])
        .status
        .success());
    let denied = cmdreg(dir.path(), "g1", &["run", "--level", "public", "stats", "10"]);
    assert!(!denied.status.success());

    let allowed = cmdreg(dir.path(), "g1", &["run", "stats", "10"]);
    assert_eq!(stdout(&allowed).trim(), "10 members");
}

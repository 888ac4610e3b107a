//! Shared test harness for orion-cli integration tests.
//!
//! Provides process runners and repo setup utilities used by all test
//! files. Environment variables are pinned for deterministic output
//! across machines and CI runners.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

// ──────────────────────────── Types ────────────────────────────

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

// ──────────────────────────── Binary Discovery ────────────────────────────

/// Discover the path to the compiled `orion` binary.
pub fn orion_bin() -> PathBuf {
    let mut path = std::env::current_exe()
        .unwrap()
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf();
    path.push("orion");
    path
}

// ──────────────────────────── Process Runners ────────────────────────────

/// Apply the pinned environment variables to a `Command`.
fn pin_env(cmd: &mut Command) {
    cmd.env("ORION_AUTHOR", "Test Author")
        .env("NO_COLOR", "1")
        .env("TZ", "UTC")
        .env("LC_ALL", "C");
}

/// Run the orion binary in `dir` with the given arguments.
pub fn orion(dir: &Path, args: &[&str]) -> CommandResult {
    let mut cmd = Command::new(orion_bin());
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd);
    capture(cmd)
}

/// Run orion with one extra environment variable set.
pub fn orion_with_env(dir: &Path, args: &[&str], key: &str, value: &str) -> CommandResult {
    let mut cmd = Command::new(orion_bin());
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd);
    cmd.env(key, value);
    capture(cmd)
}

/// Run orion with one environment variable removed from the pinned set.
pub fn orion_without_env(dir: &Path, args: &[&str], key: &str) -> CommandResult {
    let mut cmd = Command::new(orion_bin());
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd);
    cmd.env_remove(key);
    capture(cmd)
}

fn capture(mut cmd: Command) -> CommandResult {
    let output = cmd.output().expect("failed to run orion");
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(128),
    }
}

// ──────────────────────────── Repo Setup Helpers ────────────────────────────

/// Initialize an empty repo. No commits.
pub fn setup_empty_repo(dir: &Path) {
    let result = orion(dir, &["init"]);
    assert_eq!(result.exit_code, 0, "init failed: {}", result.stderr);
}

/// Initialize a repo with one committed file (`hello.txt` on `main`).
pub fn setup_repo(dir: &Path) {
    setup_empty_repo(dir);
    std::fs::write(dir.join("hello.txt"), "hello world\n").unwrap();
    assert_eq!(orion(dir, &["add", "hello.txt"]).exit_code, 0);
    let result = orion(dir, &["commit", "-m", "initial commit"]);
    assert_eq!(result.exit_code, 0, "commit failed: {}", result.stderr);
}

/// Stage and commit a single file with the given content and message.
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    if let Some(parent) = Path::new(name).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(dir.join(parent)).unwrap();
        }
    }
    std::fs::write(dir.join(name), content).unwrap();
    assert_eq!(orion(dir, &["add", name]).exit_code, 0);
    let result = orion(dir, &["commit", "-m", message]);
    assert_eq!(result.exit_code, 0, "commit failed: {}", result.stderr);
}

/// Extract the full hash of the newest commit from `orion log` output.
pub fn head_hash(dir: &Path) -> String {
    let result = orion(dir, &["log", "-n", "1"]);
    assert_eq!(result.exit_code, 0, "log failed: {}", result.stderr);
    let first_line = result.stdout.lines().next().expect("empty log output");
    first_line
        .strip_prefix("commit ")
        .expect("malformed log output")
        .to_string()
}

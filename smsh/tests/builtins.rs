use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::process::{Command, Stdio};

use tempfile::tempdir;

fn run_smsh(command: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_smsh"))
        .args(["-c", command])
        .output()
        .expect("failed to execute smsh")
}

fn run_session(script: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_smsh"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn smsh");
    child
        .stdin
        .as_mut()
        .expect("stdin piped")
        .write_all(script.as_bytes())
        .expect("write script");
    child.wait_with_output().expect("wait for smsh")
}

#[test]
fn status_is_neutral_before_any_foreground_job() {
    let output = run_smsh("status");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "exit value 0\n");
}

#[test]
fn status_reports_last_exit_code() {
    let output = run_session("false\nstatus\nexit\n");
    assert!(output.status.success(), "session failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("exit value 1"), "stdout was: {stdout}");
}

#[test]
fn status_reports_signal_termination() {
    let dir = tempdir().expect("create temp dir");
    let script = dir.path().join("selfkill.sh");
    fs::write(&script, "#!/bin/sh\nkill -TERM $$\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let session = format!("{}\nstatus\nexit\n", script.display());
    let output = run_session(&session);
    assert!(output.status.success(), "session failed: {output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Announced immediately by the foreground waiter, then again by status.
    assert_eq!(
        stdout.matches("terminated by signal 15").count(),
        2,
        "stdout was: {stdout}"
    );
}

#[test]
fn cd_changes_directory_for_later_commands() {
    let dir = tempdir().expect("create temp dir");
    let target = dir.path().canonicalize().unwrap();

    let session = format!("cd {}\npwd\nexit\n", target.display());
    let output = run_session(&session);
    assert!(output.status.success(), "session failed: {output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(&format!("{}\n", target.display())),
        "pwd did not report {}: {stdout}",
        target.display()
    );
}

#[test]
fn cd_failure_is_reported_and_survivable() {
    let output = run_session("cd /definitely/not/a/dir\nstatus\nexit\n");
    assert!(output.status.success(), "session failed: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cd:"), "stderr was: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("exit value 0"), "stdout was: {stdout}");
}

#[test]
fn builtin_prefix_is_not_dispatched_as_builtin() {
    // `cdx` must be treated as an external command, not a sloppy match for
    // `cd`; execvp then fails to find it.
    let output = run_smsh("cdx /tmp");
    assert_eq!(output.status.code(), Some(127));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("command not found"), "stderr was: {stderr}");
}

#[test]
fn comment_lines_do_nothing() {
    let output = run_session("# just a note\nstatus\nexit\n");
    assert!(output.status.success(), "session failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("exit value 0"), "stdout was: {stdout}");
}

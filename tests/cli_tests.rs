//! Integration tests for the TrailBuddy CLI

use std::io::Write;
use std::process::{Command, Output, Stdio};

const API_KEY_ENV: &str = "GEMINI_API_KEY";

fn trailbuddy() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_trailbuddy"));
    command.env("RUST_LOG", "error");
    command
}

/// Run the binary with a dummy key, feeding `input` on stdin
fn run_with_input(args: &[&str], input: &str) -> Output {
    let mut child = trailbuddy()
        .args(args)
        .env(API_KEY_ENV, "test-key")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for command")
}

/// Test that the CLI shows help with the explicit help flag
#[test]
fn test_cli_help() {
    let output = trailbuddy()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("trailbuddy"));
    assert!(stdout.contains("--trails"));
}

/// Test that a missing API key is reported and exits with an error
#[test]
fn test_missing_api_key_exits_with_error() {
    let output = trailbuddy()
        .env_remove(API_KEY_ENV)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let combined_output = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        combined_output.contains("GEMINI_API_KEY is missing"),
        "Expected missing key error, got: {combined_output}"
    );
}

/// Test that "exit" in any case ends the session after the greeting
#[test]
fn test_exit_command_is_case_insensitive() {
    let output = run_with_input(&[], "EXIT\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AI Trail Buddy is ready!"));
    assert!(stdout.contains("Choose difficulty"));
}

/// Test that end of input ends the session cleanly
#[test]
fn test_end_of_input_exits_cleanly() {
    let output = run_with_input(&[], "");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("AI Trail Buddy is ready!"));
}

/// Test that --trails replaces the dataset path
#[test]
fn test_trails_option_overrides_catalog_path() {
    let output = run_with_input(
        &["--trails", "data/no-such-trails.csv"],
        "moderate\n10\n\nloop\nexit\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Max distance (km)?"));
    assert!(stdout.contains("Sorry, I couldn't find any trails matching your preferences."));
}

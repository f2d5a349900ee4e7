//! Exit codes and output of the binary.

use super::common::run_report;

#[test]
fn test_help_lists_connection_flags() {
    let (code, stdout, _) = run_report(&["--help"]);
    assert_eq!(code, 0);
    for flag in [
        "--host",
        "--port",
        "--user",
        "--password",
        "--database",
        "--limit",
    ] {
        assert!(stdout.contains(flag), "help is missing {flag}");
    }
}

#[test]
fn test_zero_limit_is_usage_error() {
    let (code, stdout, stderr) = run_report(&["--limit", "0"]);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("--limit"));
}

#[test]
fn test_unreachable_server_fails_without_output() {
    let (code, stdout, stderr) = run_report(&["--host", "127.0.0.1", "--port", "1"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty(), "unexpected report output: {stdout}");
    assert!(
        stderr
            .lines()
            .any(|line| line.starts_with("Connection Error: ") && line.contains("127.0.0.1:1")),
        "stderr: {stderr}"
    );
}

#[test]
fn test_unknown_sslmode_is_configuration_error() {
    let (code, stdout, stderr) = run_report(&["postgres://127.0.0.1:1/news?sslmode=sometimes"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(
        stderr.contains("Configuration Error: Invalid sslmode 'sometimes'"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_invalid_connection_string_fails_without_output() {
    let (code, stdout, stderr) = run_report(&["mysql://localhost/news"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Configuration Error"), "stderr: {stderr}");
}

#[test]
fn test_unknown_named_connection_fails() {
    let (code, stdout, stderr) = run_report(&["--connection", "replica"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Connection 'replica' not found"), "stderr: {stderr}");
}

#[test]
fn test_report_against_live_database() {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let (code, stdout, stderr) = run_report(&[&url, "--limit", "2"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.starts_with("The most popular three articles of all time:\n"));
    assert!(stdout.contains("The most popular article authors of all time:\n"));
    assert!(stdout.contains("Days with more than 1% of requests leading to errors:\n"));
}

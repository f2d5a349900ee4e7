//! Common helpers for running the news-report binary.

use std::process::Command;

/// Run news-report with the given arguments.
///
/// Config files and `PG*` variables from the host are kept out of the run.
pub fn run_report(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_news-report"))
        .args(args)
        .env("NEWS_REPORT_CONFIG", "/nonexistent/news-report/config.toml")
        .env_remove("PGHOST")
        .env_remove("PGPORT")
        .env_remove("PGUSER")
        .env_remove("PGPASSWORD")
        .env_remove("PGDATABASE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

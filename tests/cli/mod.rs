//! Binary tests for one-shot and seeding mode.

pub mod oneshot_test;

use std::path::Path;
use std::process::Command;

/// Runs the intellisql binary inside `dir` with a clean environment.
///
/// Returns (exit code, stdout, stderr).
pub fn run_in(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let missing_config = dir.join("no-config.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_intellisql"))
        .current_dir(dir)
        .env_remove("GOOGLE_API_KEY")
        .env_remove("GEMINI_MODEL")
        .env("RUST_LOG", "warn")
        .arg("--config")
        .arg(&missing_config)
        .args(args)
        .output()
        .expect("Failed to execute intellisql");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

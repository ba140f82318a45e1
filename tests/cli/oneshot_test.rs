//! One-shot mode tests against the built binary.

use super::run_in;

#[test]
fn test_missing_api_key_fails_before_any_work() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, stderr) = run_in(dir.path(), &["-q", "How many entries are present?"]);

    assert_ne!(code, 0, "Expected nonzero exit code");
    assert!(stderr.contains("GOOGLE_API_KEY"), "stderr: {stderr}");
    assert!(!stdout.contains("Generated SQL:"));
    assert!(!dir.path().join("data.db").exists());
}

#[test]
fn test_seed_and_count_with_mock() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, stderr) = run_in(
        dir.path(),
        &[
            "--llm",
            "mock",
            "--seed-demo",
            "-q",
            "How many entries are present?",
        ],
    );

    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Inserted 6 rows"));
    assert!(stdout.contains("Generated SQL:"));
    assert!(stdout.contains("SELECT COUNT(*) FROM Students;"));
    assert!(stdout.contains("Query Result:"));
    assert!(stdout.contains(" 6 │"), "stdout: {stdout}");
    assert!(dir.path().join("data.db").exists());
}

#[test]
fn test_seed_demo_twice_inserts_once() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_in(dir.path(), &["--seed-demo"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Inserted 6 rows"));

    let (code, stdout, _) = run_in(dir.path(), &["--seed-demo"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("nothing inserted"));
}

#[test]
fn test_write_rejected_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_in(dir.path(), &["--seed-demo"]);
    assert_eq!(code, 0);

    let (code, stdout, stderr) = run_in(dir.path(), &["--llm", "mock", "-q", "Delete all students"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Rejected Statement"), "stderr: {stderr}");
    assert!(stderr.contains("--allow-writes"));
    assert!(stdout.contains("Generated SQL:"));
    assert!(stdout.contains("DELETE FROM Students;"));
    assert!(!stdout.contains("Query Result:"));

    let (code, stdout, _) = run_in(dir.path(), &["--llm", "mock", "-q", "How many entries?"]);
    assert_eq!(code, 0);
    assert!(stdout.contains(" 6 │"), "stdout: {stdout}");
}

#[test]
fn test_write_allowed_with_flag() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("school.db");
    let db = db.to_str().unwrap();

    let (code, _, _) = run_in(dir.path(), &["-d", db, "--seed-demo"]);
    assert_eq!(code, 0);

    let (code, stdout, stderr) = run_in(
        dir.path(),
        &["-d", db, "--llm", "mock", "--allow-writes", "-q", "Delete all students"],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("DELETE FROM Students;"));

    let (_, stdout, _) = run_in(dir.path(), &["-d", db, "--llm", "mock", "-q", "How many entries?"]);
    assert!(stdout.contains(" 0 │"), "stdout: {stdout}");
}

#[test]
fn test_unknown_provider_is_config_error() {
    let dir = tempfile::tempdir().unwrap();

    let (code, _, stderr) = run_in(dir.path(), &["--llm", "openai", "-q", "anything"]);

    assert_eq!(code, 1);
    assert_eq!(
        stderr.matches("Configuration Error:").count(),
        1,
        "stderr: {stderr}"
    );
}

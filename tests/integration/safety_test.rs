//! Write-policy tests against a real database file.

use super::{orchestrator, seeded_db};
use intellisql::db::{DatabaseClient, SqliteClient, Value};
use intellisql::error::IntelliSqlError;
use intellisql::llm::MockLlmClient;
use intellisql::safety::{SafetyLevel, SafetyPolicy};
use std::path::Path;

async fn student_count(path: &Path) -> i64 {
    let client = SqliteClient::new(path).read_only(true);
    let result = client
        .execute_query("SELECT COUNT(*) FROM Students")
        .await
        .unwrap();
    result.scalar().and_then(Value::as_i64).unwrap()
}

#[tokio::test]
async fn test_delete_rejected_under_read_only() {
    let (_dir, path) = seeded_db().await;
    let orchestrator = orchestrator(&path, MockLlmClient::new(), SafetyPolicy::ReadOnly);

    let err = orchestrator.ask("Delete all students").await.unwrap_err();

    match &err {
        IntelliSqlError::Rejected { statement_type, .. } => assert_eq!(statement_type, "DELETE"),
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert!(err.hint().contains("--allow-writes"));
    assert_eq!(student_count(&path).await, 6);
}

#[tokio::test]
async fn test_drop_rejected_under_read_only() {
    let (_dir, path) = seeded_db().await;
    let orchestrator = orchestrator(&path, MockLlmClient::new(), SafetyPolicy::ReadOnly);

    let err = orchestrator.ask("Drop the table").await.unwrap_err();

    assert!(matches!(err, IntelliSqlError::Rejected { .. }));
    assert_eq!(student_count(&path).await, 6);
}

#[tokio::test]
async fn test_delete_runs_when_writes_allowed() {
    let (_dir, path) = seeded_db().await;
    let orchestrator = orchestrator(&path, MockLlmClient::new(), SafetyPolicy::AllowWrites);

    let answer = orchestrator.ask("Delete all students").await.unwrap();

    assert_eq!(answer.sql, "DELETE FROM Students;");
    assert_eq!(answer.classification.level, SafetyLevel::Destructive);
    assert!(answer.classification.warning.is_some());
    assert!(answer.result.rows.is_empty());
    assert_eq!(student_count(&path).await, 0);
}

#[tokio::test]
async fn test_update_runs_when_writes_allowed() {
    let (_dir, path) = seeded_db().await;
    let llm = MockLlmClient::new().with_response(
        "raise",
        "```sql\nUPDATE Students SET marks = marks + 1 WHERE name = 'Anu';\n```",
    );
    let orchestrator = orchestrator(&path, llm, SafetyPolicy::AllowWrites);

    let answer = orchestrator.ask("Raise Anu's marks by one").await.unwrap();
    assert_eq!(answer.classification.level, SafetyLevel::Mutating);

    let client = SqliteClient::new(&path).read_only(true);
    let result = client
        .execute_query("SELECT marks FROM Students WHERE name = 'Anu'")
        .await
        .unwrap();
    assert_eq!(result.scalar(), Some(&Value::Int(85)));
}

#[tokio::test]
async fn test_multiple_statements_rejected_under_read_only() {
    let (_dir, path) = seeded_db().await;
    let llm = MockLlmClient::new().with_response(
        "sneaky",
        "```sql\nSELECT * FROM Students; DELETE FROM Students;\n```",
    );
    let orchestrator = orchestrator(&path, llm, SafetyPolicy::ReadOnly);

    let err = orchestrator.ask("Something sneaky").await.unwrap_err();

    assert!(matches!(err, IntelliSqlError::Rejected { .. }));
    assert_eq!(student_count(&path).await, 6);
}

#[tokio::test]
async fn test_multiple_statements_rejected_when_writes_allowed() {
    let (_dir, path) = seeded_db().await;
    let llm = MockLlmClient::new().with_response(
        "count and drop",
        "```sql\nSELECT COUNT(*) FROM Students; DROP TABLE Students;\n```",
    );
    let orchestrator = orchestrator(&path, llm, SafetyPolicy::AllowWrites);

    let err = orchestrator.ask("Count and drop").await.unwrap_err();

    assert!(matches!(err, IntelliSqlError::Rejected { .. }));
    assert!(err.to_string().contains("single statement"));
    assert_eq!(student_count(&path).await, 6);
}

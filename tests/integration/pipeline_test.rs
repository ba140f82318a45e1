//! Question -> SQL -> rows pipeline tests.

use super::{orchestrator, seeded_db};
use intellisql::db::{SqliteClient, Value, DEMO_STUDENTS};
use intellisql::error::IntelliSqlError;
use intellisql::llm::{MockFailure, MockLlmClient};
use intellisql::safety::{SafetyLevel, SafetyPolicy};
use intellisql::tui::widgets::table::ResultTable;

#[tokio::test]
async fn test_count_question_returns_row_count() {
    let (_dir, path) = seeded_db().await;
    let llm = MockLlmClient::new();
    let orchestrator = orchestrator(&path, llm.clone(), SafetyPolicy::ReadOnly);

    let answer = orchestrator
        .ask("How many entries of records are present?")
        .await
        .unwrap();

    assert_eq!(answer.sql, "SELECT COUNT(*) FROM Students;");
    assert_eq!(answer.classification.level, SafetyLevel::Safe);
    assert_eq!(answer.result.row_count, 1);
    assert_eq!(
        answer.result.scalar(),
        Some(&Value::Int(DEMO_STUDENTS.len() as i64))
    );
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_class_filter_keeps_storage_order() {
    let (_dir, path) = seeded_db().await;
    let orchestrator = orchestrator(&path, MockLlmClient::new(), SafetyPolicy::ReadOnly);

    let answer = orchestrator
        .ask("Tell me all the students studying in MCom class?")
        .await
        .unwrap();

    assert_eq!(answer.sql, "SELECT * FROM Students WHERE class='MCom';");

    let result = &answer.result;
    let names: Vec<&str> = result
        .rows
        .iter()
        .map(|row| row[0].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Dilsha", "Anu"]);

    let column_names: Vec<&str> = result.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(column_names, vec!["name", "class", "marks", "company"]);

    let marks = result.column_index("marks").unwrap();
    assert_eq!(result.rows[0][marks], Value::Int(99));
    assert_eq!(result.rows[1][marks], Value::Int(84));
}

#[tokio::test]
async fn test_repeated_question_gives_same_answer() {
    let (_dir, path) = seeded_db().await;
    let llm = MockLlmClient::new();
    let orchestrator = orchestrator(&path, llm.clone(), SafetyPolicy::ReadOnly);

    let first = orchestrator.ask("How many students are in class MCom?").await.unwrap();
    let second = orchestrator.ask("How many students are in class MCom?").await.unwrap();

    assert_eq!(first.sql, second.sql);
    assert_eq!(first.result.rows, second.result.rows);
    assert_eq!(first.result.scalar(), Some(&Value::Int(2)));
    assert_eq!(llm.call_count(), 2);
}

#[tokio::test]
async fn test_custom_response_with_prose_around_fence() {
    let (_dir, path) = seeded_db().await;
    let llm = MockLlmClient::new().with_response(
        "top scorer",
        "Here is the query:\n```sql\nSELECT name FROM Students ORDER BY marks DESC LIMIT 1;\n```\nIt sorts by marks.",
    );
    let orchestrator = orchestrator(&path, llm, SafetyPolicy::ReadOnly);

    let answer = orchestrator.ask("Who is the top scorer?").await.unwrap();

    assert_eq!(
        answer.sql,
        "SELECT name FROM Students ORDER BY marks DESC LIMIT 1;"
    );
    assert_eq!(answer.result.scalar(), Some(&Value::String("Dilsha".to_string())));
}

#[tokio::test]
async fn test_unknown_column_is_query_error() {
    let (_dir, path) = seeded_db().await;
    let llm = MockLlmClient::new().with_response("email", "```sql\nSELECT email FROM Students;\n```");
    let orchestrator = orchestrator(&path, llm, SafetyPolicy::ReadOnly);

    let err = orchestrator.ask("What is everyone's email?").await.unwrap_err();

    assert!(matches!(err, IntelliSqlError::Query(_)));
    assert!(err.to_string().contains("email"));
}

#[tokio::test]
async fn test_empty_generation_does_not_touch_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.db");
    let orchestrator = orchestrator(
        &path,
        MockLlmClient::new().with_failure(MockFailure::Empty),
        SafetyPolicy::ReadOnly,
    );

    let err = orchestrator.ask("How many entries are present?").await.unwrap_err();

    assert!(matches!(err, IntelliSqlError::EmptyGeneration));
    assert!(err.is_retryable());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_network_failure_is_retryable() {
    let (_dir, path) = seeded_db().await;
    let orchestrator = orchestrator(
        &path,
        MockLlmClient::new().with_failure(MockFailure::Network),
        SafetyPolicy::ReadOnly,
    );

    let err = orchestrator.ask("How many entries are present?").await.unwrap_err();

    assert!(matches!(err, IntelliSqlError::Network(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_missing_database_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nowhere.db");
    let orchestrator = orchestrator(&path, MockLlmClient::new(), SafetyPolicy::ReadOnly);

    let err = orchestrator.ask("How many entries are present?").await.unwrap_err();

    assert!(matches!(err, IntelliSqlError::Connection(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_result_renders_as_plain_table() {
    let (_dir, path) = seeded_db().await;
    let orchestrator = orchestrator(&path, MockLlmClient::new(), SafetyPolicy::ReadOnly);

    let answer = orchestrator.ask("List all students").await.unwrap();
    let text = ResultTable::new(&answer.result).to_plain_text();

    for (name, _, _, company) in DEMO_STUDENTS {
        assert!(text.contains(name), "missing {name}");
        assert!(text.contains(company), "missing {company}");
    }
    assert!(text.contains("6 rows returned"));
}

#[tokio::test]
async fn test_read_only_client_reports_location() {
    let (_dir, path) = seeded_db().await;
    let client = SqliteClient::new(&path).read_only(true);
    let orchestrator = orchestrator(&path, MockLlmClient::new(), SafetyPolicy::ReadOnly);

    assert!(client.is_read_only());
    assert_eq!(orchestrator.database_location(), path.display().to_string());
    assert_eq!(orchestrator.llm_description(), "mock");
}

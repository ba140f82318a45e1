//! Library-level integration tests.
//!
//! Drive the orchestrator end to end over a seeded database file.

pub mod pipeline_test;
pub mod safety_test;
pub mod tui_test;

use intellisql::app::Orchestrator;
use intellisql::db::{seed_demo, SqliteClient};
use intellisql::llm::MockLlmClient;
use intellisql::safety::SafetyPolicy;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temp directory holding a seeded `data.db`.
pub async fn seeded_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.db");
    seed_demo(&path).await.unwrap();
    (dir, path)
}

/// Builds an orchestrator over `path` using the mock LLM client.
pub fn orchestrator(path: &Path, llm: MockLlmClient, policy: SafetyPolicy) -> Orchestrator {
    let db = SqliteClient::new(path).read_only(policy.is_read_only());
    Orchestrator::new(Box::new(llm), Box::new(db), policy)
}

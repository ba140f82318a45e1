//! Database layer for IntelliSQL.
//!
//! The executor talks to the database through [`DatabaseClient`], so the
//! pipeline can be exercised against any backend that can run a statement.

mod seed;
mod sqlite;
mod types;

pub use seed::{seed_demo, DEMO_STUDENTS};
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface for database clients.
///
/// All database operations are async and return Results with IntelliSqlError.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a SQL statement and returns all resulting rows.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Returns a human-readable description of where the data lives.
    fn location(&self) -> String;
}

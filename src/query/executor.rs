//! Query execution with safety classification.
//!
//! Provides isolated query execution that can be tested independently
//! of the full orchestrator.

use tracing::{debug, warn};

use crate::db::{DatabaseClient, QueryResult};
use crate::error::Result;
use crate::safety::{classify_sql, ClassificationResult, SafetyPolicy};

/// Query executor that classifies SQL, applies the policy, and executes.
pub struct QueryExecutor<'a> {
    db: &'a dyn DatabaseClient,
    policy: SafetyPolicy,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new query executor.
    pub fn new(db: &'a dyn DatabaseClient, policy: SafetyPolicy) -> Self {
        Self { db, policy }
    }

    /// Classifies `sql` and executes it if the policy allows.
    ///
    /// A refused statement never reaches the database.
    pub async fn execute(&self, sql: &str) -> Result<QueryOutcome> {
        let classification = classify_sql(sql);
        debug!(
            level = %classification.level,
            statement = %classification.statement_type,
            "Classified statement"
        );

        self.policy.check(&classification)?;

        if classification.level.is_write() {
            warn!(
                statement = %classification.statement_type,
                level = %classification.level,
                database = %self.db.location(),
                "Executing write statement without confirmation"
            );
        }

        let result = self.db.execute_query(sql).await?;

        Ok(QueryOutcome {
            classification,
            result,
        })
    }
}

/// Successful query execution outcome.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// How the statement was classified before running.
    pub classification: ClassificationResult,
    /// The query result.
    pub result: QueryResult,
}

//! Core orchestrator for IntelliSQL.
//!
//! Chains the translator, the safety check and the database client into the
//! question -> SQL -> rows pipeline used by both the TUI and one-shot mode.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::db::{DatabaseClient, QueryResult, SqliteClient};
use crate::error::{IntelliSqlError, Result};
use crate::llm::{create_client, LlmClient, PromptTemplate, QueryTranslator};
use crate::query::QueryExecutor;
use crate::safety::{ClassificationResult, SafetyPolicy};

/// Everything produced by answering one question.
#[derive(Debug, Clone)]
pub struct Answer {
    /// The cleaned SQL the model generated.
    pub sql: String,
    /// How the SQL was classified before running.
    pub classification: ClassificationResult,
    /// Rows returned by the database.
    pub result: QueryResult,
}

/// The main orchestrator that coordinates all components.
pub struct Orchestrator {
    /// LLM client for generating SQL from natural language.
    llm: Box<dyn LlmClient>,
    /// Database client for executing queries.
    db: Box<dyn DatabaseClient>,
    /// Which generated statements may run.
    policy: SafetyPolicy,
    /// Instruction block sent ahead of each question.
    template: PromptTemplate,
}

impl Orchestrator {
    /// Creates a new orchestrator with the given components.
    pub fn new(
        llm: Box<dyn LlmClient>,
        db: Box<dyn DatabaseClient>,
        policy: SafetyPolicy,
    ) -> Self {
        Self {
            llm,
            db,
            policy,
            template: PromptTemplate::default(),
        }
    }

    /// Builds the orchestrator from resolved settings.
    ///
    /// Fails with a `Config` error when the provider needs an API key and none
    /// was given; no network client is created in that case.
    pub fn from_settings(settings: &Settings, api_key: Option<String>) -> Result<Self> {
        let llm = create_client(&settings.llm, api_key)?;
        let db = SqliteClient::new(&settings.database_path).read_only(settings.policy.is_read_only());

        Ok(Self::new(llm, Box::new(db), settings.policy))
    }

    /// Replaces the prompt template.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Returns the active safety policy.
    pub fn policy(&self) -> SafetyPolicy {
        self.policy
    }

    /// Returns a display string for the database.
    pub fn database_location(&self) -> String {
        self.db.location()
    }

    /// Returns a display string for the LLM client.
    pub fn llm_description(&self) -> String {
        self.llm.describe()
    }

    /// Answers a question: translate, check, execute.
    ///
    /// Makes exactly one LLM call. Whitespace-only questions are rejected with
    /// an `Input` error before any call. Callers that need the generated SQL
    /// when execution fails run [`translate`](Self::translate) and
    /// [`execute`](Self::execute) themselves.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        let sql = self.translate(question).await?;
        self.execute(&sql).await
    }

    /// Turns a question into cleaned SQL with one LLM call.
    pub async fn translate(&self, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(IntelliSqlError::input("Question is empty"));
        }

        info!(question_len = question.len(), "Translating question");

        let translator = QueryTranslator::new(self.llm.as_ref(), &self.template);
        let sql = translator.translate(question).await.map_err(|e| {
            warn!(category = e.category(), "Translation failed: {}", e);
            e
        })?;

        debug!(sql = %sql, "Generated SQL");
        Ok(sql)
    }

    /// Checks generated SQL against the policy and runs it.
    pub async fn execute(&self, sql: &str) -> Result<Answer> {
        let start = Instant::now();

        let executor = QueryExecutor::new(self.db.as_ref(), self.policy);
        let outcome = executor.execute(sql).await.map_err(|e| {
            warn!(category = e.category(), sql = %sql, "Execution failed: {}", e);
            e
        })?;

        info!(
            rows = outcome.result.row_count,
            statement = %outcome.classification.statement_type,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Statement executed"
        );

        Ok(Answer {
            sql: sql.to_string(),
            classification: outcome.classification,
            result: outcome.result,
        })
    }
}

//! English question -> SQL statement.

use tracing::debug;

use crate::error::{IntelliSqlError, Result};
use crate::llm::{clean_sql_response, LlmClient, PromptTemplate};

/// Turns questions into SQL using an LLM client and a prompt template.
///
/// Makes exactly one call to the client per [`translate`](Self::translate).
pub struct QueryTranslator<'a> {
    client: &'a dyn LlmClient,
    template: &'a PromptTemplate,
}

impl<'a> QueryTranslator<'a> {
    pub fn new(client: &'a dyn LlmClient, template: &'a PromptTemplate) -> Self {
        Self { client, template }
    }

    /// Translates a question into a cleaned SQL string.
    ///
    /// Returns `EmptyGeneration` if nothing is left after removing markdown.
    pub async fn translate(&self, question: &str) -> Result<String> {
        let prompt = self.template.render(question);
        let raw = self.client.complete(&prompt).await?;

        debug!(raw_len = raw.len(), "Received completion");

        let sql = clean_sql_response(&raw);
        if sql.is_empty() {
            return Err(IntelliSqlError::EmptyGeneration);
        }

        Ok(sql)
    }
}

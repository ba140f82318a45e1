//! Mock LLM client for testing.
//!
//! Provides deterministic responses based on the question in the prompt.

use async_trait::async_trait;
use regex::Regex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use crate::error::{IntelliSqlError, Result};
use crate::llm::LlmClient;

/// Marker the prompt template puts in front of the user's question.
const QUESTION_MARKER: &str = "\nQuestion: ";

/// Failure the mock should simulate instead of answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// The request never reaches the provider.
    Network,
    /// The provider answers with an error.
    Llm,
    /// The provider answers with a fenced block holding nothing.
    Empty,
}

/// Mock LLM client that returns canned responses based on input patterns.
///
/// Used for unit testing without making real API calls. Clones share the
/// call counter.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    /// Custom response mappings (pattern -> response).
    custom_responses: Vec<(String, String)>,
    /// Simulated failure, if any.
    failure: Option<MockFailure>,
    /// Number of `complete` calls made so far.
    calls: Arc<AtomicUsize>,
}

impl MockLlmClient {
    /// Creates a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom response mapping.
    ///
    /// When the question contains `pattern` (case-insensitive), the mock will
    /// return `response`. Custom mappings are checked before the defaults.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses.push((pattern.into(), response.into()));
        self
    }

    /// Makes every call fail in the given way.
    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Returns how many times `complete` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Extracts the user's question from a rendered prompt.
    fn extract_question(prompt: &str) -> &str {
        prompt
            .rfind(QUESTION_MARKER)
            .map(|idx| &prompt[idx + QUESTION_MARKER.len()..])
            .unwrap_or(prompt)
            .trim()
    }

    /// Generates a mock response based on the question.
    fn mock_response(&self, question: &str) -> String {
        let question_lower = question.to_lowercase();

        for (pattern, response) in &self.custom_responses {
            if question_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        let class = class_filter(question);

        if question_lower.contains("how many") || question_lower.contains("count") {
            return match class {
                Some(class) => format!(
                    "```sql\nSELECT COUNT(*) FROM Students WHERE class='{}';\n```",
                    class
                ),
                None => "```sql\nSELECT COUNT(*) FROM Students;\n```".to_string(),
            };
        }

        if question_lower.contains("delete") || question_lower.contains("remove") {
            return "```sql\nDELETE FROM Students;\n```".to_string();
        }

        if question_lower.contains("drop") {
            return "```sql\nDROP TABLE Students;\n```".to_string();
        }

        if let Some(class) = class {
            return format!("```sql\nSELECT * FROM Students WHERE class='{}';\n```", class);
        }

        if question_lower.contains("all students") || question_lower.contains("every student") {
            return "```sql\nSELECT * FROM Students;\n```".to_string();
        }

        "I don't understand that question. Could you please rephrase it?".to_string()
    }
}

/// Finds a class name in phrasings like "in class MCom" or "in MCom class".
fn class_filter(question: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?i)\bin\s+class\s+'?(\w+)'?|\bin\s+(?:the\s+)?'?(\w+)'?\s+class\b")
            .expect("class pattern is valid")
    });

    let caps = re.captures(question)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.failure {
            Some(MockFailure::Network) => {
                Err(IntelliSqlError::network("Simulated connection failure"))
            }
            Some(MockFailure::Llm) => Err(IntelliSqlError::llm("Simulated quota exceeded")),
            Some(MockFailure::Empty) => Ok("```sql\n```".to_string()),
            None => Ok(self.mock_response(Self::extract_question(prompt))),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

//! LLM integration for IntelliSQL.
//!
//! Provides the [`LlmClient`] trait, the Gemini implementation, and the
//! translator that turns an English question into a SQL string.

pub mod factory;
pub mod gemini;
pub mod mock;
pub mod parser;
pub mod prompt;
pub mod translator;

pub use factory::create_client;
pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::{MockFailure, MockLlmClient};
pub use parser::clean_sql_response;
pub use prompt::PromptTemplate;
pub use translator::QueryTranslator;

use async_trait::async_trait;
use std::str::FromStr;

use crate::error::Result;

/// Trait for LLM clients that can generate completions.
///
/// Implementations must be thread-safe (Send + Sync) to support async operations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends the prompt to the model and returns the raw text completion.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Returns a short provider/model label for display and logging.
    fn describe(&self) -> String;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Google Gemini
    #[default]
    Gemini,
    /// Mock client for testing (no API key required)
    Mock,
}

impl LlmProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Mock => "mock",
        }
    }

    /// Returns true if this provider needs an API key.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Gemini)
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

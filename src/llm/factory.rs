//! LLM client factory.
//!
//! Centralizes provider-specific logic for creating LLM clients.

use crate::config::LlmSettings;
use crate::error::{IntelliSqlError, Result};
use crate::llm::{GeminiClient, GeminiConfig, LlmClient, LlmProvider, MockLlmClient};

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Creates an LLM client for the resolved settings.
///
/// `api_key` is the value of `GOOGLE_API_KEY` (after `.env` loading). Providers
/// that need a key fail here, before any HTTP client exists.
pub fn create_client(settings: &LlmSettings, api_key: Option<String>) -> Result<Box<dyn LlmClient>> {
    match settings.provider {
        LlmProvider::Gemini => {
            let key = api_key
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    IntelliSqlError::config(format!(
                        "{API_KEY_ENV} not found. Set it in the environment or in a .env file."
                    ))
                })?;

            let config = GeminiConfig::new(key, settings.model.clone())
                .with_timeout(settings.timeout_secs)
                .with_base_url(settings.base_url.clone());

            Ok(Box::new(GeminiClient::new(config)?))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}

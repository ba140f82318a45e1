//! Configuration management for IntelliSQL.
//!
//! Handles loading configuration from a TOML file. Values resolved from the
//! command line and environment are layered on top in [`crate::cli`].

use crate::error::{IntelliSqlError, Result};
use crate::llm::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::llm::LlmProvider;
use crate::safety::SafetyPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database file used when none is configured.
pub const DEFAULT_DATABASE_PATH: &str = "data.db";

/// Main configuration structure for IntelliSQL.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// LLM provider configuration.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Database file configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Statement safety configuration.
    #[serde(default)]
    pub safety: SafetyConfig,
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    /// LLM provider: "gemini" or "mock".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model name (e.g., "gemini-1.5-flash").
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Scheme and host of the generation API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_provider() -> String {
    LlmProvider::default().as_str().to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            base_url: default_base_url(),
        }
    }
}

/// Database file configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Statement safety configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SafetyConfig {
    /// Execute writes and multiple statements without refusal.
    #[serde(default)]
    pub allow_writes: bool,
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("intellisql")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| IntelliSqlError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            IntelliSqlError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}

/// Resolved LLM settings after applying CLI, environment and file layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub model: String,
    pub timeout_secs: u64,
    pub base_url: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            base_url: default_base_url(),
        }
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub llm: LlmSettings,
    pub database_path: PathBuf,
    pub policy: SafetyPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
            database_path: default_database_path(),
            policy: SafetyPolicy::default(),
        }
    }
}

//! Command-line argument parsing for IntelliSQL.
//!
//! Uses clap to parse CLI arguments and layers them over the config file.

use crate::config::{Config, LlmSettings, Settings};
use crate::error::{IntelliSqlError, Result};
use crate::llm::LlmProvider;
use crate::safety::SafetyPolicy;
use clap::Parser;
use std::path::PathBuf;

/// Query a SQLite database using plain English.
#[derive(Parser, Debug)]
#[command(name = "intellisql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file
    #[arg(short = 'd', long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Gemini model name
    #[arg(long, value_name = "MODEL", env = "GEMINI_MODEL")]
    pub model: Option<String>,

    /// LLM provider: gemini or mock
    #[arg(long, value_name = "PROVIDER")]
    pub llm: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Execute generated INSERT/UPDATE/DELETE/DROP statements as well
    #[arg(long)]
    pub allow_writes: bool,

    /// Answer a single question, print the result and exit
    #[arg(short = 'q', long, value_name = "TEXT")]
    pub question: Option<String>,

    /// Create the Students table with sample rows in the database file
    #[arg(long)]
    pub seed_demo: bool,

    /// LLM request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Returns true if a one-shot question was given.
    pub fn is_one_shot(&self) -> bool {
        self.question.is_some()
    }

    /// Resolves runtime settings with precedence: CLI/env > config file > default.
    pub fn resolve_settings(&self, config: &Config) -> Result<Settings> {
        let provider_name = self.llm.as_deref().unwrap_or(&config.llm.provider);
        let provider: LlmProvider = provider_name.parse().map_err(IntelliSqlError::config)?;

        let timeout_secs = self.timeout.unwrap_or(config.llm.timeout_secs);
        if timeout_secs == 0 {
            return Err(IntelliSqlError::config("timeout must be at least 1 second"));
        }

        let llm = LlmSettings {
            provider,
            model: self
                .model
                .clone()
                .unwrap_or_else(|| config.llm.model.clone()),
            timeout_secs,
            base_url: config.llm.base_url.clone(),
        };

        Ok(Settings {
            llm,
            database_path: self
                .database
                .clone()
                .unwrap_or_else(|| config.database.path.clone()),
            policy: SafetyPolicy::from_allow_writes(
                self.allow_writes || config.safety.allow_writes,
            ),
        })
    }
}

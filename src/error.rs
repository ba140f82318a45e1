//! Error types for IntelliSQL.
//!
//! Every step of the question -> SQL -> rows pipeline reports failures through
//! [`IntelliSqlError`], so callers can tell "rephrase the question" apart from
//! "retry the request" and "the generated statement was refused".

use thiserror::Error;

/// Main error type for IntelliSQL operations.
#[derive(Error, Debug)]
pub enum IntelliSqlError {
    /// The request to the generation model never got a response
    /// (DNS failure, connection refused, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The generation model answered with an error (auth, quota, bad request).
    #[error("LLM error: {0}")]
    Llm(String),

    /// The generation model answered, but with no usable text.
    #[error("The model returned an empty response")]
    EmptyGeneration,

    /// The generated statement was refused by the safety policy.
    #[error("Refused to run {statement_type} statement: {reason}")]
    Rejected {
        statement_type: String,
        reason: String,
    },

    /// The database file could not be opened.
    #[error("Connection error: {0}")]
    Connection(String),

    /// SQLite rejected or failed the statement.
    #[error("Query error: {0}")]
    Query(String),

    /// The user input cannot be processed (e.g. an empty question).
    #[error("Input error: {0}")]
    Input(String),

    /// Configuration errors (invalid config file, missing credential, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (terminal failures, unexpected states).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntelliSqlError {
    /// Creates a network error with the given message.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Creates an LLM error with the given message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Creates a rejection for a statement refused by the safety policy.
    pub fn rejected(statement_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            statement_type: statement_type.into(),
            reason: reason.into(),
        }
    }

    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an input error with the given message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "Network Error",
            Self::Llm(_) => "LLM Error",
            Self::EmptyGeneration => "Empty Generation",
            Self::Rejected { .. } => "Rejected Statement",
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "SQL Execution Error",
            Self::Input(_) => "Input Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns true if resubmitting the same question may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::EmptyGeneration)
    }

    /// Returns a short suggestion shown next to the error message.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Network(_) => "Check your network connection and try again.",
            Self::Llm(_) => "Check GOOGLE_API_KEY and your quota, then try again.",
            Self::EmptyGeneration => "Try again or rephrase the question.",
            Self::Rejected { .. } => {
                "Rephrase the question as a lookup, or restart with --allow-writes."
            }
            Self::Connection(_) => "Check the database path (use --seed-demo to create one).",
            Self::Query(_) => "The generated SQL was invalid. Try rephrasing the question.",
            Self::Input(_) => "Type a question about the Students table.",
            Self::Config(_) => "Fix the configuration and restart.",
            Self::Internal(_) => "This is a bug. Check the log file for details.",
        }
    }
}

/// Result type alias using IntelliSqlError.
pub type Result<T> = std::result::Result<T, IntelliSqlError>;

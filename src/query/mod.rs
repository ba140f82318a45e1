//! Query execution and classification for IntelliSQL.
//!
//! This module isolates SQL classification, policy checks and execution
//! from the orchestrator.

pub mod executor;

pub use executor::{QueryExecutor, QueryOutcome};

//! IntelliSQL - query a SQLite database using plain English.
//!
//! This library exposes the core modules for use by the binary and integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod logging;
pub mod query;
pub mod safety;
pub mod tui;

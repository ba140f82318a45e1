//! SQLite database client implementation.
//!
//! Opens a fresh connection to the database file for every statement and
//! releases it before returning, on success and on error alike.

use super::{ColumnInfo, DatabaseClient, QueryResult, Row, Value};
use crate::error::{IntelliSqlError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Executor, Row as _, Statement, TypeInfo, ValueRef};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// SQLite database client bound to a single database file.
#[derive(Debug, Clone)]
pub struct SqliteClient {
    path: PathBuf,
    read_only: bool,
}

impl SqliteClient {
    /// Creates a client for the database file at `path`.
    ///
    /// Nothing is opened until a statement is executed.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_only: false,
        }
    }

    /// Opens every connection in read-only mode.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Returns the path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if connections are opened read-only.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(false)
            .read_only(self.read_only)
    }

    /// Opens a new connection to the database file.
    async fn open(&self) -> Result<SqliteConnection> {
        debug!(path = %self.path.display(), read_only = self.read_only, "Opening database");
        self.connect_options().connect().await.map_err(|e| {
            IntelliSqlError::connection(format!(
                "Cannot open database '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Runs the statement on an open connection.
    async fn run(conn: &mut SqliteConnection, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();

        let rows = sqlx::query(sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| IntelliSqlError::query(format_query_error(e)))?;

        let execution_time = start.elapsed();

        let columns = match rows.first() {
            Some(first) => first
                .columns()
                .iter()
                .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                .collect(),
            None => Self::describe_columns(conn, sql).await,
        };

        let rows: Vec<Row> = rows.iter().map(convert_row).collect();
        let row_count = rows.len();

        Ok(QueryResult {
            columns,
            rows,
            execution_time,
            row_count,
        })
    }

    /// Fetches column metadata for a statement that returned no rows.
    ///
    /// Best effort: statements that cannot be prepared again yield no columns.
    async fn describe_columns(conn: &mut SqliteConnection, sql: &str) -> Vec<ColumnInfo> {
        match (&mut *conn).prepare(sql).await {
            Ok(statement) => statement
                .columns()
                .iter()
                .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                .collect(),
            Err(e) => {
                debug!("Could not describe empty result: {}", e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let mut conn = self.open().await?;

        // On error `conn` is dropped here, which closes the handle.
        let result = Self::run(&mut conn, sql).await?;

        if let Err(e) = conn.close().await {
            warn!("Error closing database connection: {}", e);
        }

        Ok(result)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Converts a SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts a single cell using its runtime storage class.
///
/// SQLite columns are dynamically typed, so the declared column type is not
/// trusted: a `marks` column may hold INTEGER and REAL values side by side.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let storage_class = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_uppercase(),
        Err(_) => return Value::Null,
    };

    match storage_class.as_str() {
        "INTEGER" => row
            .try_get::<i64, _>(index)
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" => row
            .try_get::<f64, _>(index)
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Vec<u8>, _>(index)
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        // TEXT that is not valid UTF-8 keeps its raw bytes
        _ => row
            .try_get::<String, _>(index)
            .map(Value::String)
            .or_else(|_| row.try_get::<Vec<u8>, _>(index).map(Value::Bytes))
            .unwrap_or_else(|e| {
                debug!("Could not decode column {}: {}", index, e);
                Value::Null
            }),
    }
}

/// Formats a sqlx error into a user-friendly message.
fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => match db_error.code() {
            Some(code) => format!("{} (SQLite code {})", db_error.message(), code),
            None => db_error.message().to_string(),
        },
        None => error.to_string(),
    }
}

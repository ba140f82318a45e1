//! Demo data for the `Students` table.
//!
//! Used by `--seed-demo` so the assistant can be tried from an empty directory.

use crate::error::{IntelliSqlError, Result};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use std::path::Path;
use tracing::info;

const CREATE_STUDENTS: &str = "CREATE TABLE IF NOT EXISTS Students (
    name VARCHAR(25),
    class VARCHAR(25),
    marks INT,
    company VARCHAR(25)
)";

/// Sample rows: (name, class, marks, company).
pub const DEMO_STUDENTS: &[(&str, &str, i64, &str)] = &[
    ("Sijo", "BTech", 75, "JSW"),
    ("Lijo", "MTech", 69, "TCS"),
    ("Rijo", "BSc", 79, "WIPRO"),
    ("Sibin", "MSc", 89, "INFOSYS"),
    ("Dilsha", "MCom", 99, "Cyient"),
    ("Anu", "MCom", 84, "Accenture"),
];

/// Creates the `Students` table at `path` and fills it with demo rows.
///
/// The file is created if needed. Rows are only inserted into an empty table,
/// so running this twice does not duplicate data. Returns the number of rows
/// inserted.
pub async fn seed_demo(path: &Path) -> Result<usize> {
    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await
        .map_err(|e| {
            IntelliSqlError::connection(format!("Cannot create '{}': {}", path.display(), e))
        })?;

    let mut tx = conn
        .begin()
        .await
        .map_err(|e| IntelliSqlError::query(e.to_string()))?;

    sqlx::query(CREATE_STUDENTS)
        .execute(&mut *tx)
        .await
        .map_err(|e| IntelliSqlError::query(e.to_string()))?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Students")
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| IntelliSqlError::query(e.to_string()))?;

    let mut inserted = 0;
    if existing == 0 {
        for (name, class, marks, company) in DEMO_STUDENTS {
            sqlx::query("INSERT INTO Students (name, class, marks, company) VALUES (?, ?, ?, ?)")
                .bind(*name)
                .bind(*class)
                .bind(*marks)
                .bind(*company)
                .execute(&mut *tx)
                .await
                .map_err(|e| IntelliSqlError::query(e.to_string()))?;
            inserted += 1;
        }
    }

    tx.commit()
        .await
        .map_err(|e| IntelliSqlError::query(e.to_string()))?;
    conn.close()
        .await
        .map_err(|e| IntelliSqlError::connection(e.to_string()))?;

    info!(
        path = %path.display(),
        inserted,
        "Seeded demo Students table"
    );
    Ok(inserted)
}

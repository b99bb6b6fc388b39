//! Database schema definitions and initialization.
//!
//! This module defines the SQLite schema for journal entries. One row exists
//! per calendar date; the day's conversation and theme list are stored as
//! JSON text blobs.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::Connection;
use tracing::debug;

/// Current schema version.
///
/// Increment this whenever schema changes are made to support future migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Configures per-connection pragmas.
///
/// `case_sensitive_like` makes entry search a case-sensitive substring match;
/// SQLite's default LIKE folds ASCII case.
pub fn configure_connection(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "case_sensitive_like", "ON")?;
    Ok(())
}

/// Creates all database tables and indexes.
///
/// This function is idempotent - it uses `CREATE TABLE IF NOT EXISTS`
/// so it's safe to call multiple times.
///
/// # Tables
///
/// - `entries`: one aggregated journal record per calendar date
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    debug!("Creating database tables");

    configure_connection(conn).map_err(DatabaseError::Sqlite)?;

    // Entries table: the aggregation key is the calendar date. `conversation`
    // and `themes` are JSON text; round-trip fidelity through serde_json is
    // load-bearing.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            entry_date TEXT NOT NULL UNIQUE,
            conversation TEXT NOT NULL,
            overall_sentiment TEXT,
            sentiment_score REAL,
            themes TEXT,
            mood_color TEXT,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(entry_date DESC);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    debug!("Database tables created");
    Ok(())
}

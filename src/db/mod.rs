//! Database operations for journal entries.
//!
//! This module provides SQLite persistence for the one-row-per-day journal
//! model. It uses connection pooling via r2d2, and exposes an optional
//! after-write hook that mirrors the database file to remote storage after
//! every committed mutation.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `entries`: Entry operations (append, mood color, search, stats)
//!
//! # Example
//!
//! ```no_run
//! use confide::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/confide.db"))?;
//! db.initialize_schema()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod entries;
pub mod schema;

use crate::errors::{AppResult, DatabaseError};
use chrono::{Local, NaiveDate};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info, warn};

pub use entries::{ConversationMessage, Entry, Stats};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// After-write hook signature. Invoked after every committed mutation.
pub type AfterWriteHook = Box<dyn Fn() -> AppResult<()> + Send + Sync>;

/// Database handle with connection pooling and an optional sync hook.
///
/// The hook (when set) runs synchronously after each committed write. Its
/// failures are logged and swallowed: a sync failure must never lose the
/// local write.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
    after_write: Option<AfterWriteHook>,
}

impl Database {
    /// Opens or creates the journal database.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the connection pool
    /// cannot be initialized.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(5)
            .connection_customizer(Box::new(PragmaConfig))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        // Test the connection
        let conn = pool.get().map_err(DatabaseError::Pool)?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database {
            pool,
            after_write: None,
        })
    }

    /// Installs the after-write hook (e.g. the remote re-upload callback).
    pub fn set_after_write(&mut self, hook: AfterWriteHook) {
        self.after_write = Some(hook);
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool.get().map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// Creates all necessary tables and indexes if they don't exist.
    /// This is idempotent and safe to call multiple times.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }

    fn notify_after_write(&self) {
        if let Some(hook) = &self.after_write {
            if let Err(e) = hook() {
                // Local state stays authoritative; the write already committed.
                warn!("after-write sync hook failed: {}", e);
            }
        }
    }

    /// Appends a message to today's entry and fires the sync hook.
    pub fn append_message_today(
        &self,
        user_text: &str,
        reply: &str,
        sentiment: &str,
        sentiment_score: f64,
        themes: &[String],
    ) -> AppResult<i64> {
        let conn = self.get_conn()?;
        let entry_id = entries::append_message(
            &conn,
            Local::now().date_naive(),
            user_text,
            reply,
            sentiment,
            sentiment_score,
            themes,
        )?;
        self.notify_after_write();
        Ok(entry_id)
    }

    /// Sets today's mood color and fires the sync hook.
    pub fn set_mood_color_today(&self, color_tag: &str) -> AppResult<()> {
        let conn = self.get_conn()?;
        entries::set_mood_color(&conn, Local::now().date_naive(), color_tag)?;
        self.notify_after_write();
        Ok(())
    }

    /// Returns today's mood color tag, if set.
    pub fn mood_color_today(&self) -> AppResult<Option<String>> {
        let conn = self.get_conn()?;
        entries::get_mood_color(&conn, Local::now().date_naive())
    }

    /// Lists entries, most recent date first.
    pub fn list_entries(&self, limit: usize) -> AppResult<Vec<Entry>> {
        let conn = self.get_conn()?;
        entries::list_entries(&conn, limit)
    }

    /// Retrieves the entry for a specific date.
    pub fn entry_by_date(&self, date: NaiveDate) -> AppResult<Option<Entry>> {
        let conn = self.get_conn()?;
        entries::get_entry_by_date(&conn, date)
    }

    /// Searches entries by date or conversation text.
    pub fn search(&self, term: &str) -> AppResult<Vec<Entry>> {
        let conn = self.get_conn()?;
        entries::search_entries(&conn, term)
    }

    /// Hard-deletes an entry by id and fires the sync hook.
    pub fn delete_entry(&self, entry_id: i64) -> AppResult<()> {
        let conn = self.get_conn()?;
        entries::delete_entry(&conn, entry_id)?;
        self.notify_after_write();
        Ok(())
    }

    /// Computes aggregate statistics.
    pub fn stats(&self) -> AppResult<Stats> {
        let conn = self.get_conn()?;
        entries::stats(&conn)
    }

    /// Returns content-bearing entries from the last `n` days.
    pub fn entries_last_n_days(&self, n: i64) -> AppResult<Vec<Entry>> {
        let conn = self.get_conn()?;
        entries::entries_last_n_days(&conn, Local::now().date_naive(), n)
    }
}

/// Connection customizer applying per-connection pragmas.
#[derive(Debug)]
struct PragmaConfig;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaConfig {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        schema::configure_connection(conn)
    }

    fn on_release(&self, _conn: Connection) {}
}

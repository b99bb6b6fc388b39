//! Entry operations: append-per-day writes, reads, search and statistics.
//!
//! Every function here takes a plain connection so the logic is testable with
//! an in-memory database; the [`Database`](crate::db::Database) wrapper wires
//! in pooling and the after-write sync hook.

use crate::constants::DATE_FORMAT_ISO;
use crate::errors::{AppResult, DatabaseError};
use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One user/assistant exchange within a day's conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// The user's journal message.
    pub user: String,
    /// The companion's reply.
    pub assistant: String,
    /// RFC 3339 timestamp of the exchange.
    pub timestamp: String,
}

/// The aggregated journal record for one calendar date.
///
/// `sentiment`, `sentiment_score` and `themes` reflect only the most recent
/// analyzed message of the day; each append overwrites them. The full history
/// lives in `conversation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: i64,
    pub date: NaiveDate,
    pub conversation: Vec<ConversationMessage>,
    pub sentiment: Option<String>,
    pub sentiment_score: Option<f64>,
    pub themes: Vec<String>,
    pub mood_color: Option<String>,
    pub created_at: String,
}

impl Entry {
    /// True when the day has at least one actual journal message (not just a
    /// mood color).
    pub fn has_content(&self) -> bool {
        !self.conversation.is_empty()
    }
}

/// Aggregate statistics over the journal.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Days with at least one journal message (mood-color-only days excluded).
    pub total_days: i64,
    /// Message counts per sentiment label (uppercased), grouped over all rows
    /// with a non-null sentiment regardless of conversation content.
    pub sentiment_counts: HashMap<String, i64>,
    /// Most recent date with at least one journal message.
    pub last_entry_date: Option<NaiveDate>,
}

fn map_entry_row(row: &Row) -> Result<Entry, rusqlite::Error> {
    let date_str: String = row.get(1)?;
    let conversation_json: String = row.get(2)?;
    let themes_json: Option<String> = row.get(5)?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT_ISO).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let conversation: Vec<ConversationMessage> = serde_json::from_str(&conversation_json)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;
    let themes: Vec<String> = match themes_json {
        Some(json) => serde_json::from_str(&json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?,
        None => Vec::new(),
    };

    Ok(Entry {
        id: row.get(0)?,
        date,
        conversation,
        sentiment: row.get(3)?,
        sentiment_score: row.get(4)?,
        themes,
        mood_color: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const ENTRY_COLUMNS: &str = "id, entry_date, conversation, overall_sentiment, sentiment_score, \
                             themes, mood_color, created_at";

/// Appends a message to the entry for `date`, creating the row on the day's
/// first write.
///
/// The day's `overall_sentiment`, `sentiment_score` and `themes` are
/// overwritten with the new message's analysis; they are never merged with
/// earlier messages. Returns the entry id.
///
/// # Errors
///
/// Returns an error if the stored conversation blob cannot be parsed or a
/// database operation fails.
pub fn append_message(
    conn: &Connection,
    date: NaiveDate,
    user_text: &str,
    reply: &str,
    sentiment: &str,
    sentiment_score: f64,
    themes: &[String],
) -> AppResult<i64> {
    debug!("Appending message to entry for {}", date);

    let message = ConversationMessage {
        user: user_text.to_string(),
        assistant: reply.to_string(),
        timestamp: Local::now().to_rfc3339(),
    };
    let themes_json = serde_json::to_string(themes)
        .map_err(|e| DatabaseError::Custom(format!("Failed to serialize themes: {}", e)))?;

    let existing: Option<(i64, String)> = conn
        .query_row(
            "SELECT id, conversation FROM entries WHERE entry_date = ?1",
            params![date.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(DatabaseError::Sqlite(other)),
        })?;

    let entry_id = match existing {
        Some((id, conversation_json)) => {
            let mut conversation: Vec<ConversationMessage> =
                serde_json::from_str(&conversation_json).map_err(|e| {
                    DatabaseError::Custom(format!("Corrupt conversation blob for {}: {}", date, e))
                })?;
            conversation.push(message);
            let conversation_json = serde_json::to_string(&conversation).map_err(|e| {
                DatabaseError::Custom(format!("Failed to serialize conversation: {}", e))
            })?;

            conn.execute(
                r#"
                UPDATE entries
                SET conversation = ?1,
                    overall_sentiment = ?2,
                    sentiment_score = ?3,
                    themes = ?4,
                    updated_at = CURRENT_TIMESTAMP
                WHERE id = ?5
                "#,
                params![conversation_json, sentiment, sentiment_score, themes_json, id],
            )
            .map_err(DatabaseError::Sqlite)?;
            id
        }
        None => {
            let conversation_json = serde_json::to_string(&vec![message]).map_err(|e| {
                DatabaseError::Custom(format!("Failed to serialize conversation: {}", e))
            })?;

            conn.execute(
                r#"
                INSERT INTO entries (entry_date, conversation, overall_sentiment, sentiment_score, themes)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![date.to_string(), conversation_json, sentiment, sentiment_score, themes_json],
            )
            .map_err(DatabaseError::Sqlite)?;
            conn.last_insert_rowid()
        }
    };

    debug!("Message appended to entry {}", entry_id);
    Ok(entry_id)
}

/// Sets the mood color for `date`, creating the row on the day's first write.
///
/// Only `mood_color` (and `updated_at`) are touched on an existing row; a
/// fresh row is created with an empty conversation. A mood-color-only day is
/// a valid entry.
pub fn set_mood_color(conn: &Connection, date: NaiveDate, color_tag: &str) -> AppResult<()> {
    debug!("Setting mood color for {}", date);

    let updated = conn
        .execute(
            "UPDATE entries SET mood_color = ?1, updated_at = CURRENT_TIMESTAMP WHERE entry_date = ?2",
            params![color_tag, date.to_string()],
        )
        .map_err(DatabaseError::Sqlite)?;

    if updated == 0 {
        conn.execute(
            "INSERT INTO entries (entry_date, conversation, mood_color) VALUES (?1, '[]', ?2)",
            params![date.to_string(), color_tag],
        )
        .map_err(DatabaseError::Sqlite)?;
    }

    Ok(())
}

/// Returns the mood color tag for `date`, if one was set.
pub fn get_mood_color(conn: &Connection, date: NaiveDate) -> AppResult<Option<String>> {
    let result: Result<Option<String>, _> = conn.query_row(
        "SELECT mood_color FROM entries WHERE entry_date = ?1",
        params![date.to_string()],
        |row| row.get(0),
    );

    match result {
        Ok(color) => Ok(color),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// Lists entries, most recent date first.
pub fn list_entries(conn: &Connection, limit: usize) -> AppResult<Vec<Entry>> {
    let sql = format!(
        "SELECT {} FROM entries ORDER BY entry_date DESC LIMIT ?1",
        ENTRY_COLUMNS
    );
    let mut stmt = conn.prepare(&sql).map_err(DatabaseError::Sqlite)?;
    let entries = stmt
        .query_map(params![limit as i64], map_entry_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;
    Ok(entries)
}

/// Retrieves the entry for a specific date.
///
/// Returns `Ok(None)` if no entry exists for the given date.
pub fn get_entry_by_date(conn: &Connection, date: NaiveDate) -> AppResult<Option<Entry>> {
    let sql = format!("SELECT {} FROM entries WHERE entry_date = ?1", ENTRY_COLUMNS);
    let result = conn.query_row(&sql, params![date.to_string()], map_entry_row);

    match result {
        Ok(entry) => Ok(Some(entry)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// Searches entries whose date or serialized conversation contains `term`.
///
/// This is a case-sensitive substring match over the stored JSON text, not
/// over structured message fields. Results are ordered by date descending.
pub fn search_entries(conn: &Connection, term: &str) -> AppResult<Vec<Entry>> {
    debug!("Searching entries for term of length {}", term.len());

    let sql = format!(
        "SELECT {} FROM entries WHERE entry_date LIKE ?1 OR conversation LIKE ?1 \
         ORDER BY entry_date DESC",
        ENTRY_COLUMNS
    );
    let pattern = format!("%{}%", term);
    let mut stmt = conn.prepare(&sql).map_err(DatabaseError::Sqlite)?;
    let entries = stmt
        .query_map(params![pattern], map_entry_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;
    Ok(entries)
}

/// Hard-deletes an entry by id.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if no entry has the given id.
pub fn delete_entry(conn: &Connection, entry_id: i64) -> AppResult<()> {
    let deleted = conn
        .execute("DELETE FROM entries WHERE id = ?1", params![entry_id])
        .map_err(DatabaseError::Sqlite)?;

    if deleted == 0 {
        return Err(DatabaseError::NotFound(format!("Entry with id {} not found", entry_id)).into());
    }

    debug!("Deleted entry {}", entry_id);
    Ok(())
}

/// Computes aggregate statistics.
///
/// `total_days` and `last_entry_date` only count days with actual journal
/// messages. `sentiment_counts` intentionally groups over every row with a
/// non-null sentiment, matching the shipped product behavior.
pub fn stats(conn: &Connection) -> AppResult<Stats> {
    let total_days: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM entries WHERE conversation != '[]'",
            [],
            |row| row.get(0),
        )
        .map_err(DatabaseError::Sqlite)?;

    let mut sentiment_counts = HashMap::new();
    let mut stmt = conn
        .prepare(
            "SELECT overall_sentiment, COUNT(*) FROM entries \
             WHERE overall_sentiment IS NOT NULL GROUP BY overall_sentiment",
        )
        .map_err(DatabaseError::Sqlite)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(DatabaseError::Sqlite)?;
    for row in rows {
        let (label, count) = row.map_err(DatabaseError::Sqlite)?;
        sentiment_counts.insert(label.to_uppercase(), count);
    }

    let last_entry_date: Option<String> = conn
        .query_row(
            "SELECT MAX(entry_date) FROM entries WHERE conversation != '[]'",
            [],
            |row| row.get(0),
        )
        .map_err(DatabaseError::Sqlite)?;
    let last_entry_date = last_entry_date
        .map(|d| {
            NaiveDate::parse_from_str(&d, DATE_FORMAT_ISO)
                .map_err(|e| DatabaseError::Custom(format!("Corrupt entry_date '{}': {}", d, e)))
        })
        .transpose()?;

    Ok(Stats {
        total_days,
        sentiment_counts,
        last_entry_date,
    })
}

/// Returns content-bearing entries from the last `n` days, most recent first.
///
/// Mood-color-only rows (empty conversation) are excluded.
pub fn entries_last_n_days(conn: &Connection, today: NaiveDate, n: i64) -> AppResult<Vec<Entry>> {
    let cutoff = today - chrono::Duration::days(n);
    let sql = format!(
        "SELECT {} FROM entries WHERE entry_date >= ?1 AND conversation != '[]' \
         ORDER BY entry_date DESC",
        ENTRY_COLUMNS
    );
    let mut stmt = conn.prepare(&sql).map_err(DatabaseError::Sqlite)?;
    let entries = stmt
        .query_map(params![cutoff.to_string()], map_entry_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;
    Ok(entries)
}

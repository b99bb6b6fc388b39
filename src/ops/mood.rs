//! Daily mood color selection.
//!
//! The palette is a fixed set of six named colors. Picking one stores a
//! `name:hex` tag on today's entry, creating the row if the user has not
//! written anything yet. A mood-only day never counts as a journaled day.

use crate::constants::MOOD_COLORS;
use crate::db::Database;
use crate::errors::{AppError, AppResult};
use crate::ops::render::mood_from_tag;

/// Builds the stored `name:hex` tag for a mood name.
///
/// # Errors
///
/// Returns an error naming the valid moods when `name` is not in the palette.
pub fn mood_tag(name: &str) -> AppResult<String> {
    let name = name.to_lowercase();
    match MOOD_COLORS.iter().find(|(n, _)| *n == name) {
        Some((n, hex)) => Ok(format!("{}:{}", n, hex)),
        None => {
            let valid: Vec<&str> = MOOD_COLORS.iter().map(|(n, _)| *n).collect();
            Err(AppError::Journal(format!(
                "Unknown mood '{}'. Valid moods: {}",
                name,
                valid.join(", ")
            )))
        }
    }
}

/// Sets today's mood color and returns the refreshed status line.
pub fn set_today_mood(db: &Database, name: &str) -> AppResult<String> {
    let tag = mood_tag(name)?;
    db.set_mood_color_today(&tag)?;
    mood_status(db)
}

/// Returns today's mood status line.
pub fn mood_status(db: &Database) -> AppResult<String> {
    match db.mood_color_today()? {
        Some(tag) => {
            let (name, hex) = mood_from_tag(&tag);
            Ok(format!("Today's mood: {} ({})", name, hex))
        }
        None => Ok("No mood color selected yet for today".to_string()),
    }
}

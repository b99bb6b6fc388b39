//! Weekly wrap generation.
//!
//! Summarizes the past seven days of journaling into gratitude, learnings
//! and a short reflection. Every failure mode degrades to a rendered
//! placeholder; this function never surfaces a model error to the caller.

use crate::ai::prompts::{weekly_prompt, WEEKLY_PLACEHOLDER_MARKERS};
use crate::ai::{ChatModel, ChatRequest};
use crate::constants::{CHAT_TEMPERATURE, WEEKLY_MAX_TOKENS, WEEKLY_WINDOW_DAYS};
use crate::db::{Database, Entry};
use crate::errors::AppResult;
use tracing::{info, warn};

/// Generates the weekly wrap.
///
/// Only database failures propagate. An unreachable or misbehaving model
/// produces a placeholder instead:
/// - no content-bearing entries in the window: an invitation to start;
/// - a completion that echoes the prompt's own bracket placeholders: a
///   "not enough content" panel naming the day range and count;
/// - a transport failure: an error panel with a retry suggestion.
pub fn weekly_wrap(db: &Database, chat: &dyn ChatModel, chat_model: &str) -> AppResult<String> {
    let entries = db.entries_last_n_days(WEEKLY_WINDOW_DAYS)?;

    if entries.is_empty() {
        info!("No entries in the weekly window");
        return Ok(empty_week_view());
    }

    let week_text = compile_week(&entries);
    let request = ChatRequest {
        model: chat_model.to_string(),
        messages: weekly_prompt(&week_text),
        temperature: CHAT_TEMPERATURE,
        max_tokens: WEEKLY_MAX_TOKENS,
    };

    match chat.complete(&request) {
        Ok(content) => {
            if WEEKLY_PLACEHOLDER_MARKERS
                .iter()
                .any(|marker| content.contains(marker))
            {
                info!("Weekly wrap echoed template placeholders, treating as insufficient content");
                Ok(insufficient_content_view(&entries))
            } else {
                Ok(format!("{}{}", wrap_header(&entries), content))
            }
        }
        Err(e) => {
            warn!("Weekly wrap generation failed: {}", e);
            Ok(error_view(entries.len(), &e.to_string()))
        }
    }
}

/// Flattens the week's conversations into date-stamped dialogue text,
/// entry per entry, message per message.
fn compile_week(entries: &[Entry]) -> String {
    let mut messages = Vec::new();
    for entry in entries {
        for msg in &entry.conversation {
            messages.push(format!(
                "**Date: {}**\nYou: {}\nIris: {}\n",
                entry.date, msg.user, msg.assistant
            ));
        }
    }
    messages.join("\n")
}

/// Header naming the day range and count. Entries arrive newest first.
fn wrap_header(entries: &[Entry]) -> String {
    let newest = entries.first().map(|e| e.date.to_string()).unwrap_or_default();
    let oldest = entries.last().map(|e| e.date.to_string()).unwrap_or_default();
    format!(
        "# Weekly Wrap\n*{} to {}*\n*{} {} journaled this week*\n\n---\n\n",
        oldest,
        newest,
        entries.len(),
        days_word(entries.len())
    )
}

fn days_word(n: usize) -> &'static str {
    if n == 1 {
        "day"
    } else {
        "days"
    }
}

fn empty_week_view() -> String {
    "# Weekly Wrap\n\n\
     ### No entries found for the past 7 days\n\n\
     Start journaling to see your weekly wrap-up here!\n\n\
     *Tip: Journal for at least 3-4 days this week to get meaningful insights!*\n"
        .to_string()
}

fn insufficient_content_view(entries: &[Entry]) -> String {
    let newest = entries.first().map(|e| e.date.to_string()).unwrap_or_default();
    let oldest = entries.last().map(|e| e.date.to_string()).unwrap_or_default();
    format!(
        "# Weekly Wrap\n\n\
         ### {} to {}\n\
         *{} {} journaled this week*\n\n\
         **Not enough content to generate insights yet**\n\n\
         Your journal entries this week are a great start! However, we need \
         a bit more content to create meaningful patterns and insights.\n\n\
         *Tip: Try to journal for at least 100 words per day for richer insights!*\n",
        oldest,
        newest,
        entries.len(),
        days_word(entries.len())
    )
}

fn error_view(day_count: usize, error: &str) -> String {
    format!(
        "# Weekly Wrap\n\n\
         ### Couldn't generate analysis\n\n\
         Found **{}** {} of entries, but couldn't generate the weekly wrap.\n\n\
         Possible reasons:\n\
         - API connection issue\n\
         - Service temporarily unavailable\n\
         - Rate limit reached\n\n\
         What to do:\n\
         - Try again to refresh the weekly wrap\n\
         - Check your internet connection\n\
         - Try again in a few minutes\n\n\
         *Error details: {}*\n",
        day_count,
        days_word(day_count),
        error
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entries::append_message;
    use crate::errors::AiError;
    use chrono::{Duration, Local};
    use tempfile::TempDir;

    struct FixedChat(&'static str);

    impl ChatModel for FixedChat {
        fn complete(&self, _request: &ChatRequest) -> AppResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct OfflineChat;

    impl ChatModel for OfflineChat {
        fn complete(&self, _request: &ChatRequest) -> AppResult<String> {
            Err(AiError::Api {
                status: 503,
                body: "unavailable".to_string(),
            }
            .into())
        }
    }

    struct CapturingChat(std::sync::Mutex<Vec<ChatRequest>>);

    impl ChatModel for CapturingChat {
        fn complete(&self, request: &ChatRequest) -> AppResult<String> {
            self.0.lock().unwrap().push(request.clone());
            Ok("## Gratitude This Week\nThe hike.\n".to_string())
        }
    }

    fn open_test_db(temp_dir: &TempDir) -> Database {
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn seed_recent_entry(db: &Database, days_ago: i64, user: &str, reply: &str) {
        let conn = db.get_conn().unwrap();
        let date = Local::now().date_naive() - Duration::days(days_ago);
        append_message(&conn, date, user, reply, "POSITIVE", 0.8, &[]).unwrap();
    }

    #[test]
    fn test_empty_week_placeholder() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_test_db(&temp_dir);

        let wrap = weekly_wrap(&db, &FixedChat("unused"), "test-model").unwrap();
        assert!(wrap.contains("No entries found for the past 7 days"));
    }

    #[test]
    fn test_mood_only_day_is_an_empty_week() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_test_db(&temp_dir);
        db.set_mood_color_today("calm:#FFFFFF").unwrap();

        let wrap = weekly_wrap(&db, &FixedChat("unused"), "test-model").unwrap();
        assert!(wrap.contains("No entries found for the past 7 days"));
    }

    #[test]
    fn test_successful_wrap_has_header_and_content() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_test_db(&temp_dir);
        seed_recent_entry(&db, 2, "grateful for the hike", "lovely!");
        seed_recent_entry(&db, 0, "learned about sourdough", "tasty!");

        let wrap = weekly_wrap(
            &db,
            &FixedChat("## Gratitude This Week\nThe hike.\n"),
            "test-model",
        )
        .unwrap();

        assert!(wrap.starts_with("# Weekly Wrap"));
        assert!(wrap.contains("2 days journaled this week"));
        assert!(wrap.contains("## Gratitude This Week"));
    }

    #[test]
    fn test_placeholder_echo_means_insufficient_content() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_test_db(&temp_dir);
        seed_recent_entry(&db, 1, "hi", "hello");

        let wrap = weekly_wrap(
            &db,
            &FixedChat("## Gratitude This Week\n[List the things they were grateful for]\n"),
            "test-model",
        )
        .unwrap();

        assert!(wrap.contains("Not enough content to generate insights yet"));
        assert!(wrap.contains("1 day journaled this week"));
    }

    #[test]
    fn test_transport_failure_renders_error_panel() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_test_db(&temp_dir);
        seed_recent_entry(&db, 1, "hi", "hello");

        let wrap = weekly_wrap(&db, &OfflineChat, "test-model").unwrap();

        assert!(wrap.contains("Couldn't generate analysis"));
        assert!(wrap.contains("Found **1** day of entries"));
        assert!(wrap.contains("503"));
    }

    #[test]
    fn test_week_text_includes_dates_and_both_sides() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_test_db(&temp_dir);
        seed_recent_entry(&db, 3, "went swimming", "how was the water?");

        let chat = CapturingChat(std::sync::Mutex::new(Vec::new()));
        weekly_wrap(&db, &chat, "test-model").unwrap();

        let requests = chat.0.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_tokens, WEEKLY_MAX_TOKENS);
        let prompt = &requests[0].messages[1].content;
        assert!(prompt.contains("went swimming"));
        assert!(prompt.contains("how was the water?"));
        let date = (Local::now().date_naive() - Duration::days(3)).to_string();
        assert!(prompt.contains(&date));
    }
}

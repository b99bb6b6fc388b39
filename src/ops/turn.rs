//! A single journal exchange: analyze, reply, persist, render.

use crate::ai::{reply::generate_reply, Analysis, ChatModel, EntryAnalyzer};
use crate::constants::DEFAULT_HISTORY_LIMIT;
use crate::db::Database;
use crate::errors::AppResult;
use crate::ops::render;
use tracing::{debug, info};

/// Everything produced by one completed journal turn.
#[derive(Debug)]
pub struct TurnOutcome {
    /// The companion's reply (possibly the connection-trouble apology).
    pub reply: String,
    /// The sentiment and theme analysis of the message.
    pub analysis: Analysis,
    /// Id of today's entry row.
    pub entry_id: i64,
    /// Rendered analysis panel for this message.
    pub analysis_view: String,
    /// Refreshed history view.
    pub history_view: String,
    /// Refreshed one-line stats bar.
    pub stats_bar: String,
    /// Refreshed stats sidebar.
    pub stats_sidebar: String,
}

/// Runs one journal turn.
///
/// Empty or whitespace-only input is a no-op returning `Ok(None)`: nothing
/// is analyzed, persisted or rendered. An analyzer failure aborts the turn
/// before anything is stored. Reply generation cannot fail (it degrades to
/// an apology string, which is stored like any reply). A persistence failure
/// propagates after the reply was generated.
pub fn journal_turn(
    db: &Database,
    analyzer: &dyn EntryAnalyzer,
    chat: &dyn ChatModel,
    chat_model: &str,
    text: &str,
) -> AppResult<Option<TurnOutcome>> {
    let text = text.trim();
    if text.is_empty() {
        debug!("Ignoring empty journal input");
        return Ok(None);
    }

    let analysis = analyzer.analyze(text)?;
    debug!(
        "Analyzed entry: sentiment={} themes={}",
        analysis.sentiment_label,
        analysis.themes.len()
    );

    let reply = generate_reply(chat, chat_model, text, &analysis);

    let theme_labels: Vec<String> = analysis.theme_labels();
    let entry_id = db.append_message_today(
        text,
        &reply,
        &analysis.sentiment_label,
        analysis.sentiment_score as f64,
        &theme_labels,
    )?;
    info!("Saved journal message to entry #{}", entry_id);

    let entries = db.list_entries(DEFAULT_HISTORY_LIMIT)?;
    let stats = db.stats()?;

    Ok(Some(TurnOutcome {
        analysis_view: render::render_analysis(&analysis),
        history_view: render::render_history(&entries),
        stats_bar: render::render_stats_bar(&stats),
        stats_sidebar: render::render_stats_sidebar(&stats),
        reply,
        analysis,
        entry_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ChatRequest, ThemeScore};
    use crate::errors::{AiError, AppError};
    use tempfile::TempDir;

    struct FakeAnalyzer {
        sentiment: &'static str,
        score: f32,
        themes: Vec<(&'static str, f32)>,
    }

    impl EntryAnalyzer for FakeAnalyzer {
        fn analyze(&self, _text: &str) -> AppResult<Analysis> {
            Ok(Analysis {
                sentiment_label: self.sentiment.to_string(),
                sentiment_score: self.score,
                themes: self
                    .themes
                    .iter()
                    .map(|(label, score)| ThemeScore {
                        label: label.to_string(),
                        score: *score,
                    })
                    .collect(),
            })
        }
    }

    struct FailingAnalyzer;

    impl EntryAnalyzer for FailingAnalyzer {
        fn analyze(&self, _text: &str) -> AppResult<Analysis> {
            Err(AiError::Api {
                status: 502,
                body: "bad gateway".to_string(),
            }
            .into())
        }
    }

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

    fn open_test_db(temp_dir: &TempDir) -> Database {
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn positive_analyzer() -> FakeAnalyzer {
        FakeAnalyzer {
            sentiment: "POSITIVE",
            score: 0.9,
            themes: vec![("Health & Wellness", 0.7)],
        }
    }

    #[test]
    fn test_turn_persists_and_renders() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_test_db(&temp_dir);

        let outcome = journal_turn(
            &db,
            &positive_analyzer(),
            &FixedChat("What felt best about it?"),
            "test-model",
            "I went for a run today",
        )
        .unwrap()
        .expect("non-empty input produces an outcome");

        assert_eq!(outcome.reply, "What felt best about it?");
        assert_eq!(outcome.analysis.sentiment_label, "POSITIVE");
        assert!(outcome.analysis_view.contains("Health & Wellness"));
        assert!(outcome.history_view.contains("I went for a run today"));
        assert!(outcome.stats_bar.contains("1 days journaled"));

        let entries = db.list_entries(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, outcome.entry_id);
        assert_eq!(entries[0].conversation[0].user, "I went for a run today");
        assert_eq!(entries[0].sentiment.as_deref(), Some("POSITIVE"));
        assert_eq!(entries[0].themes, vec!["Health & Wellness"]);
    }

    #[test]
    fn test_empty_input_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_test_db(&temp_dir);

        let outcome = journal_turn(
            &db,
            &positive_analyzer(),
            &FixedChat("reply"),
            "test-model",
            "   \n\t ",
        )
        .unwrap();

        assert!(outcome.is_none());
        assert!(db.list_entries(10).unwrap().is_empty());
    }

    #[test]
    fn test_analyzer_failure_persists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_test_db(&temp_dir);

        let result = journal_turn(
            &db,
            &FailingAnalyzer,
            &FixedChat("reply"),
            "test-model",
            "hello",
        );

        assert!(matches!(result, Err(AppError::Ai(_))));
        assert!(db.list_entries(10).unwrap().is_empty());
    }

    #[test]
    fn test_chat_failure_stores_apology_reply() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_test_db(&temp_dir);

        let outcome = journal_turn(
            &db,
            &positive_analyzer(),
            &OfflineChat,
            "test-model",
            "rough day",
        )
        .unwrap()
        .unwrap();

        assert!(outcome.reply.contains("trouble connecting"));

        let entries = db.list_entries(10).unwrap();
        assert!(entries[0].conversation[0]
            .assistant
            .contains("trouble connecting"));
    }

    #[test]
    fn test_second_turn_same_day_appends_and_overwrites_analysis() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_test_db(&temp_dir);

        journal_turn(
            &db,
            &positive_analyzer(),
            &FixedChat("nice!"),
            "test-model",
            "morning walk",
        )
        .unwrap();

        let second = FakeAnalyzer {
            sentiment: "NEGATIVE",
            score: 0.8,
            themes: vec![("Work & Career", 0.6)],
        };
        journal_turn(&db, &second, &FixedChat("oh no"), "test-model", "bad meeting").unwrap();

        let entries = db.list_entries(10).unwrap();
        assert_eq!(entries.len(), 1, "same-day turns share one entry");
        assert_eq!(entries[0].conversation.len(), 2);
        assert_eq!(entries[0].sentiment.as_deref(), Some("NEGATIVE"));
        assert_eq!(entries[0].themes, vec!["Work & Career"]);
    }
}

//! Constants used throughout the application.
//!
//! This module contains all constants used in the Confide application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "confide";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A conversational journaling companion";

// Configuration Keys & Environment Variables
/// Environment variable for the journal database path.
pub const ENV_VAR_CONFIDE_DB: &str = "CONFIDE_DB";
/// Environment variable for the chat-completion API key.
pub const ENV_VAR_GROQ_API_KEY: &str = "GROQ_API_KEY";
/// Environment variable for the Hugging Face inference API token (optional).
pub const ENV_VAR_HF_API_TOKEN: &str = "HF_API_TOKEN";
/// Environment variable overriding the chat model name.
pub const ENV_VAR_CHAT_MODEL: &str = "CONFIDE_CHAT_MODEL";
/// Environment variable overriding the sentiment model name.
pub const ENV_VAR_SENTIMENT_MODEL: &str = "CONFIDE_SENTIMENT_MODEL";
/// Environment variable overriding the theme model name.
pub const ENV_VAR_THEME_MODEL: &str = "CONFIDE_THEME_MODEL";
/// Environment variable overriding the chat-completions endpoint base URL.
pub const ENV_VAR_CHAT_URL: &str = "CONFIDE_CHAT_URL";
/// Environment variable overriding the inference endpoint base URL.
pub const ENV_VAR_INFERENCE_URL: &str = "CONFIDE_INFERENCE_URL";

// Defaults
/// Default journal database path (expanded with the user's home directory).
pub const DEFAULT_DB_PATH: &str = "~/.confide/journal.db";
/// Default chat-completion model.
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.3-70b-versatile";
/// Default sentiment-analysis model.
pub const DEFAULT_SENTIMENT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";
/// Default zero-shot theme-classification model.
pub const DEFAULT_THEME_MODEL: &str = "facebook/bart-large-mnli";
/// Default base URL for the OpenAI-compatible chat-completions API.
pub const DEFAULT_CHAT_URL: &str = "https://api.groq.com/openai";
/// Default base URL for the hosted inference API (sentiment + zero-shot).
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Theme Classification
/// The fixed closed vocabulary of journal themes.
///
/// The candidate set is exhaustive and fixed. It is not user-extensible.
pub const THEMES: [&str; 8] = [
    "Work & Career",
    "Relationships & Social",
    "Health & Wellness",
    "Personal Growth",
    "Creativity & Hobbies",
    "Emotions & Mental Health",
    "Daily Life & Routine",
    "Nature & Outdoors",
];
/// Minimum confidence for a theme label to be kept (strictly greater than).
pub const THEME_SCORE_THRESHOLD: f32 = 0.30;
/// Maximum number of themes kept per message.
pub const MAX_THEMES: usize = 3;

// Mood Colors
/// Preset mood palette as (mood name, hex color) pairs.
pub const MOOD_COLORS: [(&str, &str); 6] = [
    ("calm", "#FFFFFF"),
    ("happy", "#FFF44F"),
    ("energetic", "#FF6347"),
    ("anxious", "#9370DB"),
    ("sad", "#4169E1"),
    ("angry", "#DC143C"),
];

// Generation Parameters
/// Sampling temperature for chat completions.
pub const CHAT_TEMPERATURE: f32 = 0.7;
/// Token budget for a per-turn reply.
pub const REPLY_MAX_TOKENS: u32 = 200;
/// Token budget for the weekly wrap.
pub const WEEKLY_MAX_TOKENS: u32 = 1500;
/// Fallback theme description injected into the reply prompt when no theme
/// cleared the threshold.
pub const NO_THEMES_FALLBACK: &str = "general reflection";

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Number of days covered by the weekly wrap.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;
/// Default number of entries shown in history views.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

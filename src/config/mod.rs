//! Configuration management for the confide application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It supports configuring the journal database
//! path, the hosted model endpoints, and the model names used for analysis and
//! reply generation.
//!
//! # Environment Variables
//!
//! - `CONFIDE_DB`: Path to the journal database (defaults to ~/.confide/journal.db)
//! - `GROQ_API_KEY`: API key for the chat-completions endpoint (required)
//! - `HF_API_TOKEN`: Token for the hosted inference API (optional)
//! - `CONFIDE_CHAT_MODEL`, `CONFIDE_SENTIMENT_MODEL`, `CONFIDE_THEME_MODEL`:
//!   model name overrides
//! - `CONFIDE_CHAT_URL`, `CONFIDE_INFERENCE_URL`: endpoint base URL overrides

use crate::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_CHAT_URL, DEFAULT_DB_PATH, DEFAULT_INFERENCE_URL,
    DEFAULT_SENTIMENT_MODEL, DEFAULT_THEME_MODEL, ENV_VAR_CHAT_MODEL, ENV_VAR_CHAT_URL,
    ENV_VAR_CONFIDE_DB, ENV_VAR_GROQ_API_KEY, ENV_VAR_HF_API_TOKEN, ENV_VAR_INFERENCE_URL,
    ENV_VAR_SENTIMENT_MODEL, ENV_VAR_THEME_MODEL, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the confide application.
///
/// Holds the database location, API credentials, model names and endpoint
/// base URLs. Load it once at startup with [`Config::load`] and pass it down;
/// nothing in the application reads the environment after that point.
#[derive(Clone)]
pub struct Config {
    /// Path to the SQLite journal database.
    pub db_path: PathBuf,

    /// API key for the chat-completions endpoint.
    pub chat_api_key: String,

    /// Optional token for the hosted inference API.
    pub inference_api_token: Option<String>,

    /// Chat-completion model used for replies and the weekly wrap.
    pub chat_model: String,

    /// Sentiment-analysis model.
    pub sentiment_model: String,

    /// Zero-shot theme-classification model.
    pub theme_model: String,

    /// Base URL of the OpenAI-compatible chat-completions API.
    pub chat_url: String,

    /// Base URL of the hosted inference API.
    pub inference_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_path", &self.db_path)
            .field("chat_api_key", &REDACTED_PLACEHOLDER)
            .field(
                "inference_api_token",
                &self.inference_api_token.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .field("chat_model", &self.chat_model)
            .field("sentiment_model", &self.sentiment_model)
            .field("theme_model", &self.theme_model)
            .field("chat_url", &self.chat_url)
            .field("inference_url", &self.inference_url)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `GROQ_API_KEY` is missing or empty, or
    /// if the database path cannot be expanded.
    pub fn load() -> AppResult<Self> {
        let chat_api_key = env::var(ENV_VAR_GROQ_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(format!(
                    "{} is not set. Get a key and export it before running confide.",
                    ENV_VAR_GROQ_API_KEY
                ))
            })?;

        let raw_db_path =
            env::var(ENV_VAR_CONFIDE_DB).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let db_path = PathBuf::from(
            shellexpand::full(&raw_db_path)
                .map_err(|e| {
                    AppError::Config(format!("Cannot expand database path '{}': {}", raw_db_path, e))
                })?
                .into_owned(),
        );

        let inference_api_token = env::var(ENV_VAR_HF_API_TOKEN)
            .ok()
            .filter(|t| !t.trim().is_empty());

        Ok(Config {
            db_path,
            chat_api_key,
            inference_api_token,
            chat_model: env::var(ENV_VAR_CHAT_MODEL)
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            sentiment_model: env::var(ENV_VAR_SENTIMENT_MODEL)
                .unwrap_or_else(|_| DEFAULT_SENTIMENT_MODEL.to_string()),
            theme_model: env::var(ENV_VAR_THEME_MODEL)
                .unwrap_or_else(|_| DEFAULT_THEME_MODEL.to_string()),
            chat_url: env::var(ENV_VAR_CHAT_URL).unwrap_or_else(|_| DEFAULT_CHAT_URL.to_string()),
            inference_url: env::var(ENV_VAR_INFERENCE_URL)
                .unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_string()),
        })
    }

    /// Validates the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the database path has no parent directory
    /// or a model name / endpoint URL is empty.
    pub fn validate(&self) -> AppResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path cannot be empty".to_string()));
        }
        for (name, value) in [
            ("chat model", &self.chat_model),
            ("sentiment model", &self.sentiment_model),
            ("theme model", &self.theme_model),
            ("chat URL", &self.chat_url),
            ("inference URL", &self.inference_url),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!("{} cannot be empty", name)));
            }
        }
        Ok(())
    }
}

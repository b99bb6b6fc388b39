//! Hosted model integrations for journal analysis and reply generation.
//!
//! This module wraps two hosted classification models (sentiment and zero-shot
//! theme detection) and an OpenAI-compatible chat-completions API. The model
//! calls are exposed through small capability traits so the core journaling
//! logic can be tested against deterministic fakes instead of live endpoints.
//!
//! # Module Structure
//!
//! - `analysis`: analysis result types and the theme selection rule
//! - `inference`: HTTP client for the hosted classification models
//! - `chat`: HTTP client for chat completions
//! - `prompts`: persona prompt and message builders
//! - `reply`: per-turn reply generation with its never-fails fallback

pub mod analysis;
pub mod chat;
pub mod inference;
pub mod prompts;
pub mod reply;

use crate::errors::AppResult;

// Re-export commonly used types
pub use analysis::{Analysis, ThemeScore};
pub use chat::{ChatClient, ChatRequest, Message};
pub use inference::InferenceClient;
pub use reply::generate_reply;

/// Capability for analyzing a journal message.
///
/// Implemented by [`InferenceClient`] for production use; tests provide fakes
/// returning fixed labels and scores.
pub trait EntryAnalyzer {
    /// Analyzes a non-empty journal message, returning its sentiment and the
    /// themes that cleared the confidence threshold.
    ///
    /// # Errors
    ///
    /// A failing model call is fatal for the turn: no partial analysis is
    /// produced and the error propagates to the caller.
    fn analyze(&self, text: &str) -> AppResult<Analysis>;
}

/// Capability for chat completion.
///
/// Implemented by [`ChatClient`] for production use; tests provide fakes
/// returning canned completions or errors.
pub trait ChatModel {
    /// Sends a chat-completion request and returns the completion text.
    fn complete(&self, request: &ChatRequest) -> AppResult<String>;
}

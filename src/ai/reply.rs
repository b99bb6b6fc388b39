//! Per-turn reply generation.

use crate::ai::prompts::reply_prompt;
use crate::ai::{Analysis, ChatModel, ChatRequest};
use crate::constants::{CHAT_TEMPERATURE, REPLY_MAX_TOKENS};
use tracing::{debug, warn};

/// Generates the companion's reply to a journal message.
///
/// On any transport or model failure this returns a user-facing apology
/// string embedding the error text instead of an error. The reply is always
/// a string, never absent, so storage and rendering never special-case a
/// failed generation.
pub fn generate_reply(
    chat: &dyn ChatModel,
    model: &str,
    entry_text: &str,
    analysis: &Analysis,
) -> String {
    let request = ChatRequest {
        model: model.to_string(),
        messages: reply_prompt(entry_text, analysis),
        temperature: CHAT_TEMPERATURE,
        max_tokens: REPLY_MAX_TOKENS,
    };

    match chat.complete(&request) {
        Ok(reply) => {
            debug!("Generated reply ({} chars)", reply.len());
            reply
        }
        Err(e) => {
            warn!("Reply generation failed: {}", e);
            format!("I'm having trouble connecting right now. Error: {}", e)
        }
    }
}

//! HTTP client for the OpenAI-compatible chat-completions API.
//!
//! This module provides a simple blocking client for requesting chat
//! completions from a hosted endpoint (Groq in the default configuration).

use crate::errors::{AiError, AppResult};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender (system, user, assistant)
    pub role: String,
    /// The content of the message
    pub content: String,
}

impl Message {
    /// Creates a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// A fully-specified chat-completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// One completion choice in the API response.
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Message,
}

/// Response body from the chat-completions endpoint.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Client for an OpenAI-compatible chat-completions API.
pub struct ChatClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl ChatClient {
    /// Creates a new chat client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g., "https://api.groq.com/openai")
    /// * `api_key` - Bearer token for the API
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Sends a chat-completion request and returns the completion text.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API is not reachable
    /// - The model is not found (HTTP 404)
    /// - The API returns an error status or a malformed body
    pub fn chat(&self, request: &ChatRequest) -> AppResult<String> {
        debug!("Sending chat request with model: {}", request.model);

        let url = format!("{}/v1/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .map_err(AiError::Offline)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();

            if status.as_u16() == 404 {
                return Err(AiError::ModelNotFound(request.model.clone()).into());
            }

            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let chat_response: ChatResponse = response.json().map_err(|e| {
            AiError::InvalidResponse(format!("Failed to parse chat response: {}", e))
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AiError::InvalidResponse("No choices in chat response".to_string()))?;

        debug!("Received chat completion ({} chars)", content.len());
        Ok(content)
    }
}

impl super::ChatModel for ChatClient {
    fn complete(&self, request: &ChatRequest) -> AppResult<String> {
        self.chat(request)
    }
}

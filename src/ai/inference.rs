//! HTTP client for the hosted classification models.
//!
//! Wraps two independently hosted models behind one client: a sentiment
//! classifier returning a single best label with confidence, and a zero-shot
//! classifier scoring the text against the fixed theme vocabulary.

use crate::ai::analysis::{select_themes, Analysis, ThemeScore};
use crate::ai::EntryAnalyzer;
use crate::constants::THEMES;
use crate::errors::{AiError, AppResult};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// One (label, score) pair from the sentiment model.
#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// Response body from the zero-shot classification model.
#[derive(Debug, Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f32>,
}

/// Request parameters for zero-shot classification.
#[derive(Debug, Serialize)]
struct ZeroShotParameters {
    candidate_labels: Vec<String>,
    multi_label: bool,
}

/// Client for the hosted inference API (sentiment + zero-shot themes).
pub struct InferenceClient {
    base_url: String,
    api_token: Option<String>,
    sentiment_model: String,
    theme_model: String,
    client: Client,
}

impl InferenceClient {
    /// Creates a new inference client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the inference API
    /// * `api_token` - Optional bearer token
    /// * `sentiment_model` - Model id for sentiment analysis
    /// * `theme_model` - Model id for zero-shot theme classification
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        sentiment_model: impl Into<String>,
        theme_model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_token,
            sentiment_model: sentiment_model.into(),
            theme_model: theme_model.into(),
            client: Client::new(),
        }
    }

    fn post_model(&self, model: &str, body: &serde_json::Value) -> AppResult<reqwest::blocking::Response> {
        let url = format!("{}/models/{}", self.base_url, model);
        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().map_err(AiError::Offline)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();

            if status.as_u16() == 404 {
                return Err(AiError::ModelNotFound(model.to_string()).into());
            }

            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response)
    }

    /// Runs sentiment analysis, returning the single best (label, score) pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails or the response contains no
    /// labels.
    pub fn sentiment(&self, text: &str) -> AppResult<(String, f32)> {
        debug!("Running sentiment analysis with {}", self.sentiment_model);

        let response = self.post_model(&self.sentiment_model, &json!({ "inputs": text }))?;

        // The API nests results one level deep for single-input requests.
        let parsed: Vec<Vec<LabelScore>> = response.json().map_err(|e| {
            AiError::InvalidResponse(format!("Failed to parse sentiment response: {}", e))
        })?;

        let best = parsed
            .into_iter()
            .flatten()
            .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
            .ok_or_else(|| AiError::InvalidResponse("Empty sentiment response".to_string()))?;

        debug!("Sentiment: {} ({:.3})", best.label, best.score);
        Ok((best.label, best.score))
    }

    /// Scores the text against the fixed theme vocabulary (multi-label).
    ///
    /// Returns raw per-label scores; callers apply [`select_themes`].
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails or labels and scores disagree
    /// in length.
    pub fn classify_themes(&self, text: &str) -> AppResult<Vec<ThemeScore>> {
        debug!("Running theme classification with {}", self.theme_model);

        let parameters = ZeroShotParameters {
            candidate_labels: THEMES.iter().map(|t| t.to_string()).collect(),
            multi_label: true,
        };
        let body = json!({ "inputs": text, "parameters": parameters });
        let response = self.post_model(&self.theme_model, &body)?;

        let parsed: ZeroShotResponse = response.json().map_err(|e| {
            AiError::InvalidResponse(format!("Failed to parse theme response: {}", e))
        })?;

        if parsed.labels.len() != parsed.scores.len() {
            return Err(AiError::InvalidResponse(
                "Mismatched labels and scores in theme response".to_string(),
            )
            .into());
        }

        Ok(parsed
            .labels
            .into_iter()
            .zip(parsed.scores)
            .map(|(label, score)| ThemeScore { label, score })
            .collect())
    }
}

impl EntryAnalyzer for InferenceClient {
    /// Analyzes a journal message with both hosted models.
    ///
    /// Either model failing is fatal for the turn; there is no partial
    /// analysis and no fallback heuristic.
    fn analyze(&self, text: &str) -> AppResult<Analysis> {
        let (sentiment_label, sentiment_score) = self.sentiment(text)?;
        let raw_themes = self.classify_themes(text)?;
        let themes = select_themes(raw_themes);

        Ok(Analysis {
            sentiment_label,
            sentiment_score,
            themes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_client_creation() {
        let client = InferenceClient::new(
            "http://localhost:8080",
            Some("token".to_string()),
            "sentiment-model",
            "theme-model",
        );
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.sentiment_model, "sentiment-model");
        assert_eq!(client.theme_model, "theme-model");
    }

    #[test]
    fn test_zero_shot_parameters_serialize() {
        let parameters = ZeroShotParameters {
            candidate_labels: THEMES.iter().map(|t| t.to_string()).collect(),
            multi_label: true,
        };
        let json = serde_json::to_value(&parameters).unwrap();
        assert_eq!(json["multi_label"], true);
        assert_eq!(json["candidate_labels"].as_array().unwrap().len(), 8);
    }
}

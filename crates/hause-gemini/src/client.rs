//! HTTP client for the Gemini generateContent endpoint.

use crate::error::{GeminiError, Result};
use tracing::debug;

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Generative-language API base.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Thin request/response wrapper around the generateContent API.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    api_base: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Creates a client for the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Creates a client for a specific model.
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            api_base: GEMINI_API_BASE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_api_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: api_base.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Creates a client from `GEMINI_API_KEY`, if set and non-empty.
    pub fn from_env() -> Option<Self> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Some(Self::new(key)),
            _ => None,
        }
    }

    /// The model this client targets.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates text for a prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        );

        debug!(model = %self.model, prompt_len = prompt.len(), "Calling generateContent");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await
            .map_err(|e| GeminiError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, body });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GeminiError::Request(e.to_string()))?;

        parse_generate_response(&json)
    }
}

fn parse_generate_response(json: &serde_json::Value) -> Result<String> {
    let text = json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or(GeminiError::InvalidResponse)?;

    if text.trim().is_empty() {
        return Err(GeminiError::InvalidResponse);
    }

    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_response() {
        let json = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello community!" }] }
            }]
        });
        assert_eq!(parse_generate_response(&json).unwrap(), "Hello community!");
    }

    #[test]
    fn test_parse_generate_response_missing_text() {
        let json = serde_json::json!({"candidates": []});
        assert!(matches!(
            parse_generate_response(&json),
            Err(GeminiError::InvalidResponse)
        ));
    }

    #[test]
    fn test_parse_generate_response_blank_text() {
        let json = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        });
        assert!(parse_generate_response(&json).is_err());
    }

    #[test]
    fn test_from_env_requires_key() {
        std::env::remove_var("GEMINI_API_KEY");
        assert!(GeminiClient::from_env().is_none());
    }
}

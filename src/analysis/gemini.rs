//! Hosted text-generation backend
//!
//! Calls the `generateContent` endpoint with a single-part prompt and
//! returns the first candidate's text.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::AnalysisBackend;
use crate::config::AnalysisSettings;
use crate::error::{PocketError, PocketResult};

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
    }
}

/// Text generation over HTTP
pub struct GeminiBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> PocketResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PocketError::Analysis(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Build from settings, reading the API key from the environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the key variable is unset or empty.
    pub fn from_settings(settings: &AnalysisSettings) -> PocketResult<Self> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                PocketError::Config(format!(
                    "Analysis API key is not configured; set {}",
                    settings.api_key_env
                ))
            })?;

        Self::new(
            settings.endpoint.clone(),
            settings.model.clone(),
            api_key,
            Duration::from_secs(settings.timeout_secs.max(1)),
        )
    }

    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint, self.model)
    }
}

impl AnalysisBackend for GeminiBackend {
    fn generate(&self, prompt: &str) -> PocketResult<String> {
        debug!(model = %self.model, chars = prompt.len(), "requesting analysis");

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| PocketError::Analysis(format!("Analysis request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PocketError::Analysis(format!(
                "Analysis service returned {}",
                status
            )));
        }

        let reply: GenerateResponse = response
            .json()
            .map_err(|e| PocketError::Analysis(format!("Failed to read analysis reply: {}", e)))?;

        reply
            .first_text()
            .ok_or_else(|| PocketError::Analysis("Analysis reply was empty".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text() {
        let reply: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"tips\":[]}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(reply.first_text().as_deref(), Some(r#"{"tips":[]}"#));
    }

    #[test]
    fn test_empty_reply_has_no_text() {
        let reply: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(reply.first_text().is_none());
    }

    #[test]
    fn test_url() {
        let backend = GeminiBackend::new(
            "https://generativelanguage.googleapis.com/v1beta/models/",
            "gemini-pro",
            "k",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            backend.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let settings = AnalysisSettings {
            api_key_env: "POCKETPLAN_TEST_UNSET_ANALYSIS_KEY".into(),
            ..Default::default()
        };
        let err = GeminiBackend::from_settings(&settings).err().unwrap();
        assert!(matches!(err, PocketError::Config(_)));
    }
}

use std::time::Duration;

use reqwest::{blocking::Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::{AdviceOutcome, AdviceProvider};
use crate::config::{AdviceSettings, Config};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Error)]
enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Calls the Gemini `generateContent` endpoint with a blocking client.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key: Option<String>,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl GeminiProvider {
    pub fn new(api_key: Option<String>, settings: &AdviceSettings) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: settings.model.clone(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(settings.timeout_secs.max(1)),
        }
    }

    /// Provider using the credential resolved from the environment or `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.resolve_api_key(), &config.advice)
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn call(&self, api_key: &str, prompt: &str) -> Result<String, GeminiError> {
        let client = Client::builder().timeout(self.timeout).build()?;
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let response = client
            .post(self.url())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GeminiError::Status { status, body });
        }
        Ok(response.json::<GenerateResponse>()?.text())
    }
}

impl AdviceProvider for GeminiProvider {
    fn generate(&self, prompt: &str) -> AdviceOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            return AdviceOutcome::Unavailable;
        };
        tracing::info!(model = %self.model, "sending advice request");
        match self.call(api_key, prompt) {
            Ok(text) => AdviceOutcome::Success(text),
            Err(err) => AdviceOutcome::Failure(err.to_string()),
        }
    }
}

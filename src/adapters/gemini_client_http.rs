//! Gemini `generateContent` client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::domain::{AppError, GeminiConfig};
use crate::ports::{CompletionRequest, TextGenerator};

const X_GOOG_API_KEY: &str = "x-goog-api-key";
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// HTTP client for the Gemini API. One request per completion, no retries.
#[derive(Clone)]
pub struct HttpGeminiClient {
    api_key: String,
    endpoint: Url,
    client: Client,
}

impl std::fmt::Debug for HttpGeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGeminiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpGeminiClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &GeminiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        let base = config.api_url.as_str().trim_end_matches('/');
        let endpoint = Url::parse(&format!("{}/models/{}:generateContent", base, config.model))
            .map_err(|e| AppError::InvalidConfig(format!("Invalid Gemini endpoint: {}", e)))?;

        Ok(Self { api_key, endpoint, client })
    }

    /// Create from `GEMINI_API_KEY` with the given configuration.
    pub fn from_env_with_config(config: &GeminiConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            AppError::config_error(format!("{} environment variable not set", API_KEY_ENV))
        })?;

        Self::new(api_key, config)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl TextGenerator for HttpGeminiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, AppError> {
        let api_request = ApiRequest {
            contents: vec![Content { role: "user", parts: vec![Part { text: &request.prompt }] }],
            generation_config: GenerationConfig {
                response_mime_type: request.format.mime_type(),
            },
        };

        debug!(format = request.format.mime_type(), chars = request.prompt.len(), "gemini request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&api_request)
            .send()
            .map_err(|e| AppError::GenerationFailure {
                reason: format!("HTTP request failed: {}", e),
                status: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::GenerationFailure {
                reason: format!("API error ({}): {}", status.as_u16(), error_text),
                status: Some(status.as_u16()),
            });
        }

        let api_response: ApiResponse = response
            .json()
            .map_err(|e| AppError::generation(format!("Failed to parse response: {}", e)))?;

        let text: String = api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::generation("No text in response"));
        }
        Ok(text)
    }
}

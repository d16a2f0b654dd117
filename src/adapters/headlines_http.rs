//! Top-headlines API client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::domain::{AppError, HeadlinesConfig};
use crate::ports::HeadlineSource;

const API_KEY_ENV: &str = "NEWS_API_KEY";

#[derive(Clone)]
pub struct HttpHeadlineSource {
    api_key: String,
    api_url: Url,
    country: String,
    limit: usize,
    client: Client,
}

impl std::fmt::Debug for HttpHeadlineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpHeadlineSource")
            .field("api_url", &self.api_url)
            .field("country", &self.country)
            .field("limit", &self.limit)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpHeadlineSource {
    pub fn new(api_key: String, config: &HeadlinesConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            country: config.country.clone(),
            limit: config.limit,
            client,
        })
    }

    /// Create from `NEWS_API_KEY` with the given configuration.
    pub fn from_env_with_config(config: &HeadlinesConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            AppError::config_error(format!("{} environment variable not set", API_KEY_ENV))
        })?;

        Self::new(api_key, config)
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl Article {
    /// Description, or the title when the description is missing or blank.
    fn snippet(self) -> Option<String> {
        [self.description, self.title]
            .into_iter()
            .flatten()
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
    }
}

impl HeadlineSource for HttpHeadlineSource {
    fn fetch_headlines(&self) -> Result<Vec<String>, AppError> {
        if self.limit == 0 {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .get(self.api_url.clone())
            .query(&[("apiKey", self.api_key.as_str()), ("country", self.country.as_str())])
            .send()
            .map_err(|e| AppError::UpstreamFetchFailure(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "headline request rejected: {}", body);
            return Err(AppError::UpstreamFetchFailure(format!(
                "unexpected status {}",
                status.as_u16()
            )));
        }

        let api_response: ApiResponse = response.json().map_err(|e| {
            AppError::UpstreamFetchFailure(format!("Failed to parse response: {}", e))
        })?;

        info!(articles = api_response.articles.len(), "fetched headlines");

        Ok(api_response
            .articles
            .into_iter()
            .take(self.limit)
            .filter_map(Article::snippet)
            .collect())
    }
}

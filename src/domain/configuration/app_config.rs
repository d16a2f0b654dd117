//! Application configuration models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::group::DEFAULT_GROUP_NAMES;
use crate::domain::{AppError, GroupTable};

/// Configuration loaded from `brillianse.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Group table configuration.
    #[serde(default)]
    pub groups: GroupsConfig,
    /// Daily generation configuration.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Gemini API configuration.
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Headline API configuration.
    #[serde(default)]
    pub headlines: HeadlinesConfig,
    /// Firestore configuration.
    #[serde(default)]
    pub firestore: FirestoreConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.groups.table()?;
        self.generation.validate()?;
        self.gemini.validate()?;
        self.headlines.validate()?;
        self.firestore.validate()?;
        Ok(())
    }
}

/// Response count and the ordered group name table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupsConfig {
    /// Number of answers that determine a group (N).
    #[serde(default = "default_response_count")]
    pub response_count: u32,
    /// Group names indexed by answer bits; must hold exactly 2^N entries.
    #[serde(default = "default_group_names")]
    pub names: Vec<String>,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self { response_count: default_response_count(), names: default_group_names() }
    }
}

impl GroupsConfig {
    /// Build the validated group table.
    pub fn table(&self) -> Result<GroupTable, AppError> {
        GroupTable::new(self.response_count, self.names.clone())
    }
}

fn default_response_count() -> u32 {
    3
}

fn default_group_names() -> Vec<String> {
    DEFAULT_GROUP_NAMES.iter().map(|name| name.to_string()).collect()
}

/// How the day's questions are sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    /// The model picks its own topics.
    #[default]
    SelfSourced,
    /// Statements are seeded by top headlines, topped up with self-sourced questions.
    Headlines,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::SelfSourced => "self-sourced",
            GenerationMode::Headlines => "headlines",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self-sourced" => Ok(GenerationMode::SelfSourced),
            "headlines" => Ok(GenerationMode::Headlines),
            other => Err(AppError::InvalidConfig(format!(
                "unknown generation mode '{}': expected self-sourced or headlines",
                other
            ))),
        }
    }
}

/// Daily generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Number of questions published per day (K).
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Topic sourcing mode.
    #[serde(default)]
    pub mode: GenerationMode,
    /// Location the prompt is written for.
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            mode: GenerationMode::default(),
            location: default_location(),
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.question_count == 0 {
            return Err(AppError::InvalidConfig(
                "question_count must be greater than 0".to_string(),
            ));
        }
        if self.location.trim().is_empty() {
            return Err(AppError::InvalidConfig("location must not be empty".to_string()));
        }
        Ok(())
    }
}

fn default_question_count() -> usize {
    5
}

fn default_location() -> String {
    "Toronto, Canada".to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API base URL; the model path is appended.
    #[serde(default = "default_gemini_url")]
    pub api_url: Url,
    /// Model name.
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per completion.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: default_gemini_url(),
            model: default_gemini_model(),
            timeout_secs: default_generation_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl GeminiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidConfig("gemini.model must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.max_retries == 0 {
            return Err(AppError::InvalidConfig("max_retries must be greater than 0".to_string()));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_gemini_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta")
        .expect("Default Gemini URL must be valid")
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_generation_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

/// Top-headlines API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadlinesConfig {
    /// Top-headlines endpoint.
    #[serde(default = "default_headlines_url")]
    pub api_url: Url,
    /// Two-letter country code.
    #[serde(default = "default_country")]
    pub country: String,
    /// Maximum number of snippets used as topics.
    #[serde(default = "default_headline_limit")]
    pub limit: usize,
    /// Request timeout in seconds.
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

impl Default for HeadlinesConfig {
    fn default() -> Self {
        Self {
            api_url: default_headlines_url(),
            country: default_country(),
            limit: default_headline_limit(),
            timeout_secs: default_store_timeout(),
        }
    }
}

impl HeadlinesConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.country.len() != 2 || !self.country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::InvalidConfig(format!(
                "headlines.country must be a two-letter code, got '{}'",
                self.country
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }
}

fn default_headlines_url() -> Url {
    Url::parse("https://newsapi.org/v2/top-headlines").expect("Default headlines URL must be valid")
}

fn default_country() -> String {
    "ca".to_string()
}

fn default_headline_limit() -> usize {
    3
}

/// Firestore REST configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FirestoreConfig {
    /// REST base URL (point at the emulator for local runs).
    #[serde(default = "default_firestore_url")]
    pub api_url: Url,
    /// Project id; required by every command that touches the store.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Database id.
    #[serde(default = "default_database")]
    pub database: String,
    /// Document overwritten with the current day's questions.
    #[serde(default = "default_daily_document")]
    pub daily_document: String,
    /// Collection holding one write-once document per date.
    #[serde(default = "default_archive_collection")]
    pub archive_collection: String,
    /// Collection holding one membership document per group.
    #[serde(default = "default_groups_collection")]
    pub groups_collection: String,
    /// Request timeout in seconds.
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            api_url: default_firestore_url(),
            project_id: None,
            database: default_database(),
            daily_document: default_daily_document(),
            archive_collection: default_archive_collection(),
            groups_collection: default_groups_collection(),
            timeout_secs: default_store_timeout(),
        }
    }
}

impl FirestoreConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(project) = &self.project_id
            && project.trim().is_empty()
        {
            return Err(AppError::InvalidConfig("firestore.project_id must not be empty".into()));
        }
        // Documents live at an even number of path segments, collections at an odd number.
        if !is_document_path(&self.daily_document) {
            return Err(AppError::InvalidConfig(format!(
                "firestore.daily_document must be a document path, got '{}'",
                self.daily_document
            )));
        }
        for (key, collection) in [
            ("archive_collection", &self.archive_collection),
            ("groups_collection", &self.groups_collection),
        ] {
            if !is_collection_path(collection) {
                return Err(AppError::InvalidConfig(format!(
                    "firestore.{} must be a collection path, got '{}'",
                    key, collection
                )));
            }
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Project id, or a configuration error naming the missing key.
    pub fn require_project_id(&self) -> Result<&str, AppError> {
        self.project_id.as_deref().ok_or_else(|| {
            AppError::config_error("firestore.project_id is not set in the configuration file")
        })
    }
}

/// Number of `/`-separated segments, or `None` when any segment is empty.
fn segment_count(path: &str) -> Option<usize> {
    let segments: Vec<_> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) { None } else { Some(segments.len()) }
}

fn is_document_path(path: &str) -> bool {
    matches!(segment_count(path), Some(n) if n % 2 == 0)
}

fn is_collection_path(path: &str) -> bool {
    matches!(segment_count(path), Some(n) if n % 2 == 1)
}

fn default_firestore_url() -> Url {
    Url::parse("https://firestore.googleapis.com/v1").expect("Default Firestore URL must be valid")
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_daily_document() -> String {
    "config/daily".to_string()
}

fn default_archive_collection() -> String {
    "question_archive".to_string()
}

fn default_groups_collection() -> String {
    "groups".to_string()
}

fn default_store_timeout() -> u64 {
    15
}

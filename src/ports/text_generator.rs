//! Text generation API port definition.

use crate::domain::AppError;

/// Shape of the completion the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Free text.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

impl ResponseFormat {
    /// MIME type requested from the API.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ResponseFormat::Text => "text/plain",
            ResponseFormat::Json => "application/json",
        }
    }
}

/// One prompt-in, text-out completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub format: ResponseFormat,
}

impl CompletionRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), format: ResponseFormat::Text }
    }

    pub fn json(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), format: ResponseFormat::Json }
    }
}

/// Port for language-model completions.
pub trait TextGenerator {
    /// Return the raw completion text, or `GenerationFailure`.
    fn complete(&self, request: &CompletionRequest) -> Result<String, AppError>;
}

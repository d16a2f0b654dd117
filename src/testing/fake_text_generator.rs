use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::{CompletionRequest, ResponseFormat, TextGenerator};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

/// Scripted generator that replays queued completions and records requests.
#[derive(Debug, Clone, Default)]
pub struct FakeTextGenerator {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<(ResponseFormat, String)>>>,
}

impl FakeTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Text(text.into()));
        self
    }

    /// Queue a `{"questions": [...]}` completion.
    pub fn reply_questions(self, questions: &[&str]) -> Self {
        let body = serde_json::json!({ "questions": questions }).to_string();
        self.reply(body)
    }

    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Fail(reason.into()));
        self
    }

    pub fn requests(&self) -> Vec<(ResponseFormat, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl TextGenerator for FakeTextGenerator {
    fn complete(&self, request: &CompletionRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push((request.format, request.prompt.clone()));
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(reason)) => Err(AppError::generation(reason)),
            None => Err(AppError::generation("fake: no scripted reply")),
        }
    }
}

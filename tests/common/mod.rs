//! Shared testing utilities for brillianse CLI tests.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::path::Path;

const SECRET_VARS: [&str; 3] = ["GEMINI_API_KEY", "NEWS_API_KEY", "FIRESTORE_ACCESS_TOKEN"];

/// Isolated working directory for CLI invocations.
#[allow(dead_code)]
pub struct TestContext {
    work_dir: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let work_dir = TempDir::new().expect("Failed to create temp directory for tests");
        Self { work_dir }
    }

    pub fn work_dir(&self) -> &Path {
        self.work_dir.path()
    }

    /// Write `brillianse.toml` into the working directory.
    pub fn write_config(&self, content: &str) {
        self.work_dir.child("brillianse.toml").write_str(content).expect("Failed to write config");
    }

    /// Config pointing Gemini and Firestore at a local mock server.
    pub fn write_mock_config(&self, server_url: &str) {
        self.write_config(&mock_config(server_url));
    }

    /// Build a command for the compiled binary with secrets cleared from the environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("brillianse").expect("Failed to locate brillianse binary");
        cmd.current_dir(self.work_dir()).env("RUST_LOG", "off");
        for key in SECRET_VARS {
            cmd.env_remove(key);
        }
        cmd
    }
}

#[allow(dead_code)]
pub fn mock_config(server_url: &str) -> String {
    format!(
        r#"[gemini]
api_url = "{url}"
model = "gemini-test"
timeout_secs = 5
max_retries = 1
retry_delay_ms = 1

[headlines]
api_url = "{url}/v2/top-headlines"
timeout_secs = 5

[firestore]
api_url = "{url}"
project_id = "demo"
timeout_secs = 5
"#,
        url = server_url
    )
}

/// Gemini `generateContent` response body wrapping `text`.
#[allow(dead_code)]
pub fn gemini_reply(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    })
    .to_string()
}

/// Gemini reply carrying a `{"questions": [...]}` batch.
#[allow(dead_code)]
pub fn gemini_questions(questions: &[&str]) -> String {
    gemini_reply(&serde_json::json!({ "questions": questions }).to_string())
}

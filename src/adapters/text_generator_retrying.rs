//! Retry wrapper for text generation requests.

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::domain::{AppError, GeminiConfig};
use crate::ports::{CompletionRequest, TextGenerator};

const DEFAULT_MAX_DELAY_MS: u64 = 30_000;

/// Attempt budget and backoff bounds for one completion.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &GeminiConfig) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay_ms: config.retry_delay_ms.max(1),
            max_delay_ms: DEFAULT_MAX_DELAY_MS.max(config.retry_delay_ms),
        }
    }

    /// Pause after the `retry`-th failure: `base * 2^(retry - 1)` plus jitter, never above the cap.
    fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = 2_u64.checked_pow(retry.saturating_sub(1)).unwrap_or(u64::MAX);
        let backoff = self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        let delay = backoff.saturating_add(jitter(backoff)).min(self.max_delay_ms);
        Duration::from_millis(delay)
    }
}

pub struct RetryingTextGenerator {
    inner: Box<dyn TextGenerator>,
    policy: RetryPolicy,
}

impl RetryingTextGenerator {
    pub fn new(inner: Box<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl TextGenerator for RetryingTextGenerator {
    fn complete(&self, request: &CompletionRequest) -> Result<String, AppError> {
        let mut attempt = 1;
        loop {
            let error = match self.inner.complete(request) {
                Ok(text) => return Ok(text),
                Err(error) => error,
            };
            if attempt >= self.policy.max_attempts || !is_transient(&error) {
                return Err(error);
            }

            let delay = self.policy.delay_for_retry(attempt);
            warn!(
                attempt,
                max_attempts = self.policy.max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "completion failed, retrying"
            );
            thread::sleep(delay);
            attempt += 1;
        }
    }
}

/// Timeouts, throttling, server errors and dropped connections.
fn is_transient(error: &AppError) -> bool {
    let AppError::GenerationFailure { reason, status } = error else {
        return false;
    };
    match status {
        Some(code) => matches!(*code, 408 | 429 | 500..=599),
        None => {
            let reason = reason.to_ascii_lowercase();
            ["http request failed", "timed out", "connection"].iter().any(|s| reason.contains(s))
        }
    }
}

/// Random extra wait of up to a quarter of `backoff_ms`.
fn jitter(backoff_ms: u64) -> u64 {
    let spread = backoff_ms / 4;
    if spread == 0 {
        return 0;
    }
    RandomState::new().hash_one(backoff_ms) % spread
}

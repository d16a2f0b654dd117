use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::AppError;
use crate::ports::HeadlineSource;

#[derive(Debug, Clone)]
pub struct FakeHeadlineSource {
    headlines: Option<Vec<String>>,
    calls: Arc<AtomicUsize>,
}

impl FakeHeadlineSource {
    pub fn with(headlines: &[&str]) -> Self {
        Self {
            headlines: Some(headlines.iter().map(|h| h.to_string()).collect()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose every fetch fails upstream.
    pub fn unreachable() -> Self {
        Self { headlines: None, calls: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HeadlineSource for FakeHeadlineSource {
    fn fetch_headlines(&self) -> Result<Vec<String>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.headlines
            .clone()
            .ok_or_else(|| AppError::UpstreamFetchFailure("fake: unreachable".to_string()))
    }
}

use crate::domain::AppError;

/// Port for fetching current news snippets used as question topics.
pub trait HeadlineSource {
    /// Ordered snippets, at most the configured limit.
    ///
    /// Fails with `UpstreamFetchFailure`; callers treat that as "no topics".
    fn fetch_headlines(&self) -> Result<Vec<String>, AppError>;
}

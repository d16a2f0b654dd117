use chrono::NaiveDate;

use crate::domain::{AppError, DailyContent};

/// Result of a write-once archive request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveWrite {
    /// No archive existed; it was created.
    Created,
    /// An identical archive already existed; nothing changed.
    Unchanged,
}

/// Port for the daily question documents.
pub trait ContentStore {
    /// Replace the current-day document.
    fn put_daily(&self, content: &DailyContent) -> Result<(), AppError>;

    /// Create the archive for the content's date.
    ///
    /// Never overwrites: an existing archive with the same questions yields
    /// `ArchiveWrite::Unchanged`, one with different questions fails with
    /// `ArchiveConflict`.
    fn put_archive(&self, content: &DailyContent) -> Result<ArchiveWrite, AppError>;

    /// Read the archive for a date, if any.
    fn get_archive(&self, date: NaiveDate) -> Result<Option<DailyContent>, AppError>;
}

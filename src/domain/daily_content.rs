//! The day's generated question batch.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::AppError;

/// Format used for date-keyed documents.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Questions published for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyContent {
    date: NaiveDate,
    questions: Vec<String>,
    created_at: DateTime<Utc>,
}

impl DailyContent {
    /// Build the day's content, requiring exactly `expected` non-empty questions.
    pub fn new(
        date: NaiveDate,
        questions: Vec<String>,
        created_at: DateTime<Utc>,
        expected: usize,
    ) -> Result<Self, AppError> {
        if questions.len() != expected {
            return Err(AppError::generation(format!(
                "expected {} questions, got {}",
                expected,
                questions.len()
            )));
        }
        if let Some(position) = questions.iter().position(|q| q.trim().is_empty()) {
            return Err(AppError::generation(format!("question {} is empty", position + 1)));
        }
        Ok(Self { date, questions, created_at })
    }

    /// Rebuild content read back from a store without re-checking cardinality.
    pub fn restore(date: NaiveDate, questions: Vec<String>, created_at: DateTime<Utc>) -> Self {
        Self { date, questions, created_at }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Document key for the date (`YYYY-MM-DD`).
    pub fn date_key(&self) -> String {
        date_key(self.date)
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Same date and questions; creation time is ignored.
    pub fn same_batch(&self, other: &DailyContent) -> bool {
        self.date == other.date && self.questions == other.questions
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date_key(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|err| {
        AppError::config_error(format!("Invalid date '{}': expected YYYY-MM-DD ({})", value, err))
    })
}

use thiserror::Error;

/// Errors that can occur when building or parsing schedule dates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleDateError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),
    #[error("Invalid day {day} for {year}-{month:02}")]
    InvalidDay { year: i64, month: u32, day: u32 },
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    Parse(String),
}

/// Result type for schedule date operations.
pub type Result<T> = std::result::Result<T, ScheduleDateError>;

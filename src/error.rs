//! Custom error types for the expense tracker
//!
//! Validation errors (dates, amounts) abort the write that triggered them.
//! Storage errors are split by direction so callers can degrade reads while
//! still surfacing failed writes.

use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Date string could not be split into 2 or 3 integer tokens
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// Month token outside 1..=12
    #[error("Month should be from 1 to 12, got {0}")]
    MonthOutOfRange(i64),

    /// Day token outside 1..=31
    #[error("Day should be from 1 to 31, got {0}")]
    DayOutOfRange(i64),

    /// Amount text is not a decimal number (or is negative where it can't be)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Persisting a row failed
    #[error("Storage write failed: {0}")]
    StorageWriteFailure(String),

    /// Reading rows failed
    #[error("Storage read failed: {0}")]
    StorageReadFailure(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type LedgerResult<T> = Result<T, LedgerError>;

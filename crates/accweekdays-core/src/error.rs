use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccWeekdaysError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Timestamp {0} is outside the representable calendar range")]
    TimestampOutOfRange(i64),

    #[error("No local midnight exists on {date}")]
    NoMidnight { date: NaiveDate },

    #[error("Start timestamp {start} is after end timestamp {end}")]
    StartAfterEnd { start: i64, end: i64 },

    #[error("Invalid timezone '{name}': {reason}")]
    InvalidTimezone { name: String, reason: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

//! Weekday-seconds between two Unix timestamps.
//!
//! The scalar entry point is [`accweekdays`]; [`kernel`] and [`schema`] apply
//! it column-wise over Arrow batches and Parquet files.

pub mod calendar;
pub mod config;
pub mod description;
pub mod error;
pub mod kernel;
pub mod schema;
pub mod weekdays;

pub use config::ZoneSetting;
pub use error::AccWeekdaysError;
pub use weekdays::{accweekdays, weekday_seconds};

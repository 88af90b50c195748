use chrono::NaiveDate;
use thiserror::Error;

pub type SunResult<T> = Result<T, SunError>;

#[derive(Error, Debug)]
pub enum SunError {
    #[error("Coordinate out of range: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Date {0} is too close to the end of the supported calendar")]
    DateOutOfRange(NaiveDate),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

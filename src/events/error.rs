use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Required column '{0}' not found in DataFrame")]
    MissingColumn(String),

    #[error("Could not parse timestamp '{value}' in column '{column}'")]
    TimestampParse { column: String, value: String },

    #[error("Column '{column}' has unsupported type {dtype} for timestamps")]
    UnsupportedTimeType { column: String, dtype: String },

    #[error("Timestamp {value} in column '{column}' is out of range")]
    TimestampOutOfRange { column: String, value: i64 },

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),
}

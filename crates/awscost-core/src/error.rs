//! Error types for awscost
//!
//! This module defines the error types used throughout the awscost crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use awscost_core::error::{AwsCostError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to AwsCostError
//!     let _file = std::fs::read_to_string("nonexistent.json")?;
//!     Ok(())
//! }
//! ```

use chrono::NaiveDate;
use thiserror::Error;

/// Message shown above the raw error text whenever loading cost data fails,
/// whatever the cause.
pub const LOAD_FAILURE_MESSAGE: &str =
    "Unable to load data. Please verify your AWS permissions or credentials.";

/// Main error type for awscost operations
#[derive(Error, Debug)]
pub enum AwsCostError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// End of a date range precedes its start
    #[error("Invalid date range: end {end} precedes start {start}")]
    InvalidRange {
        /// Requested start date
        start: NaiveDate,
        /// Requested end date
        end: NaiveDate,
    },

    /// A field required to build a cost record is absent from the response
    #[error("Missing field in cost response: {0}")]
    MissingField(String),

    /// A cost amount could not be parsed as a decimal number
    #[error("Invalid cost amount '{amount}' for {service} on {date}")]
    InvalidAmount {
        /// Day the amount belongs to
        date: String,
        /// Service key of the group
        service: String,
        /// The raw amount string
        amount: String,
    },

    /// Billing API call failed (auth, throttling, invalid range, network)
    #[error("Cost Explorer request failed: {0}")]
    Api(String),

    /// An operation that needs at least one record got none
    #[error("No cost records to process")]
    EmptyData,

    /// Chart rendering failed
    #[error("Chart rendering error: {0}")]
    Chart(String),

    /// CSV export failed
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in awscost
pub type Result<T> = std::result::Result<T, AwsCostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AwsCostError::EmptyData;
        assert_eq!(error.to_string(), "No cost records to process");

        let error = AwsCostError::InvalidAmount {
            date: "2024-01-01".to_string(),
            service: "Amazon S3".to_string(),
            amount: "abc".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid cost amount 'abc' for Amazon S3 on 2024-01-01"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: AwsCostError = io_error.into();
        assert!(matches!(error, AwsCostError::Io(_)));
    }
}

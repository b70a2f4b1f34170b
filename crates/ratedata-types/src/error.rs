//! Error types for ratedata.

use chrono::NaiveDate;
use thiserror::Error;

use crate::SymbolError;

/// Result type alias for ratedata operations.
pub type Result<T> = std::result::Result<T, RatedataError>;

/// Errors that can occur while preparing an acquisition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatedataError {
    /// Invalid currency pair.
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// Invalid month range.
    #[error(transparent)]
    MonthRange(#[from] MonthRangeError),

    /// No symbols were selected.
    #[error("No symbols selected")]
    NoSymbols,
}

/// Error for invalid month ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MonthRangeError {
    /// Start month is after end month.
    #[error("Invalid month range: {start} > {end}")]
    InvalidRange {
        /// The start month.
        start: NaiveDate,
        /// The end month.
        end: NaiveDate,
    },

    /// The string is not a month.
    #[error("Invalid month {0:?}: expected YYYY-MM or YYYY/M")]
    InvalidMonth(String),
}

//! Error types for bundle partitioning.

use ratedata_types::TimestampError;
use thiserror::Error;

/// Errors that abort the partitioning of a bundle.
#[derive(Error, Debug)]
pub enum PartitionError {
    /// A required column is absent from the header.
    ///
    /// The bundle does not have the expected layout; no record can be read.
    #[error("Missing column {column:?} in bundle header")]
    MissingColumn {
        /// Name of the missing column.
        column: &'static str,
    },

    /// A record could not be turned into a tick.
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the bundle.
        line: u64,
        /// Why the record was rejected.
        reason: MalformedReason,
    },

    /// Reading the bundle failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PartitionError {
    /// Returns true if the bundle layout itself is wrong, as opposed to one record.
    #[must_use]
    pub const fn is_missing_column(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }
}

/// Why a record was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// The record's field count disagrees with the header.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Number of header columns.
        expected: usize,
        /// Number of fields in the record.
        found: usize,
    },

    /// The timestamp matches neither accepted encoding.
    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    /// The record could not be decoded.
    #[error("{0}")]
    Decode(String),
}

impl From<csv::Error> for PartitionError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, csv::Position::line);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Self::Io(e),
            _ => Self::MalformedRecord {
                line,
                reason: MalformedReason::Decode(message),
            },
        }
    }
}

//! Record parsing: one CSV record to one [`Tick`].

use csv::StringRecord;
use ratedata_types::{Tick, parse_timestamp};

use crate::{MalformedReason, PartitionError};

/// Header name of the timestamp column.
pub const TIMESTAMP_COLUMN: &str = "RateDateTime";
/// Header name of the bid column.
pub const BID_COLUMN: &str = "RateBid";
/// Header name of the ask column.
pub const ASK_COLUMN: &str = "RateAsk";

/// Positions of the consumed columns within a bundle header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    timestamp: usize,
    bid: usize,
    ask: usize,
    width: usize,
}

impl ColumnIndex {
    /// Locates the timestamp, bid and ask columns by name.
    ///
    /// Names are compared after trimming surrounding whitespace. Columns other
    /// than the three consumed ones are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PartitionError::MissingColumn`] naming the first absent column.
    pub fn from_names<'a, I>(names: I) -> Result<Self, PartitionError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().map(str::trim).collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|name| *name == column)
                .ok_or(PartitionError::MissingColumn { column })
        };

        Ok(Self {
            timestamp: find(TIMESTAMP_COLUMN)?,
            bid: find(BID_COLUMN)?,
            ask: find(ASK_COLUMN)?,
            width: names.len(),
        })
    }

    /// Returns the number of header columns every record must carry.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }
}

/// Turns records of one bundle into ticks.
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    columns: ColumnIndex,
}

impl RecordParser {
    /// Creates a parser for the given header record.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing.
    pub fn from_header(header: &StringRecord) -> Result<Self, PartitionError> {
        Ok(Self::new(ColumnIndex::from_names(header.iter())?))
    }

    /// Creates a parser from already located columns.
    #[must_use]
    pub const fn new(columns: ColumnIndex) -> Self {
        Self { columns }
    }

    /// Returns the located columns.
    #[must_use]
    pub const fn columns(&self) -> ColumnIndex {
        self.columns
    }

    /// Parses one record; `line` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`PartitionError::MalformedRecord`] if the field count differs
    /// from the header or the timestamp matches neither encoding.
    pub fn parse(&self, record: &StringRecord, line: u64) -> Result<Tick, PartitionError> {
        let malformed = |reason| PartitionError::MalformedRecord { line, reason };

        if record.len() != self.columns.width {
            return Err(malformed(MalformedReason::FieldCount {
                expected: self.columns.width,
                found: record.len(),
            }));
        }

        // Width was checked above, so every index is present.
        let field = |index| record.get(index).unwrap_or_default();

        let timestamp = parse_timestamp(field(self.columns.timestamp))
            .map_err(|e| malformed(MalformedReason::Timestamp(e)))?;

        Ok(Tick::new(
            timestamp,
            field(self.columns.bid),
            field(self.columns.ask),
        ))
    }
}

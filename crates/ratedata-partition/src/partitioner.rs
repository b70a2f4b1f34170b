//! Streaming split of a bundle into calendar days.

use std::io::Read;
use std::iter::FusedIterator;

use chrono::{NaiveDate, NaiveDateTime};
use ratedata_types::{DaySegment, SegmentTag, Tick};

use crate::{PartitionError, RecordParser};

/// Accumulates re-serialized tick lines for the current day.
///
/// Feed ticks in timestamp order with [`push`](Self::push); a completed day
/// is returned as soon as a tick with a later date arrives. Call
/// [`finish`](Self::finish) at end of stream for the last day.
#[derive(Debug, Default)]
pub struct DayAccumulator {
    current_date: Option<NaiveDate>,
    last_timestamp: Option<NaiveDateTime>,
    lines: Vec<String>,
}

impl DayAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_date: None,
            last_timestamp: None,
            lines: Vec::new(),
        }
    }

    /// Returns the date of the day being accumulated, if any.
    #[must_use]
    pub const fn current_date(&self) -> Option<NaiveDate> {
        self.current_date
    }

    /// Returns the number of lines buffered for the current day.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.lines.len()
    }

    /// Adds a tick, returning the previous day if this tick starts a new one.
    ///
    /// Ticks dated before the current day are appended to the current day;
    /// input order is not verified.
    pub fn push(&mut self, tick: &Tick) -> Option<DaySegment> {
        let date = tick.date();

        let sealed = match self.current_date {
            Some(current) if date > current => {
                self.current_date = Some(date);
                let lines = std::mem::take(&mut self.lines);
                Some(DaySegment::new(SegmentTag::Date(current), lines))
            }
            Some(_) => None,
            None => {
                self.current_date = Some(date);
                None
            }
        };

        self.lines.push(tick.to_line());
        self.last_timestamp = Some(tick.timestamp());
        sealed
    }

    /// Seals the remaining lines as the final day.
    ///
    /// The final segment is tagged with the last tick's full timestamp rather
    /// than its date. Returns `None` if no tick was ever pushed.
    #[must_use]
    pub fn finish(self) -> Option<DaySegment> {
        let last = self.last_timestamp?;
        Some(DaySegment::new(SegmentTag::LastTick(last), self.lines))
    }
}

/// Lazily splits one bundle into [`DaySegment`]s.
///
/// The header is read on construction; records are then parsed one at a time
/// as the iterator is advanced, so at most one day of lines is held in
/// memory. The iterator is fused: after an error or the final segment it
/// only returns `None`.
///
/// # Example
///
/// ```
/// use ratedata_partition::DailyPartitioner;
///
/// let bundle = "RateDateTime,RateBid,RateAsk\n\
///               2015-03-02 10:00:00,1.1,1.2\n\
///               2015-03-03 10:00:00,1.1,1.2\n";
///
/// let dates: Vec<_> = DailyPartitioner::new(bundle.as_bytes())
///     .unwrap()
///     .map(|day| day.unwrap().file_name())
///     .collect();
/// assert_eq!(dates, ["2015-03-02.csv", "2015-03-03.csv"]);
/// ```
pub struct DailyPartitioner<R> {
    records: csv::StringRecordsIntoIter<R>,
    parser: RecordParser,
    accumulator: DayAccumulator,
    ticks: u64,
    done: bool,
}

impl<R> std::fmt::Debug for DailyPartitioner<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyPartitioner")
            .field("parser", &self.parser)
            .field("accumulator", &self.accumulator)
            .field("ticks", &self.ticks)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<R: Read> DailyPartitioner<R> {
    /// Reads the header from `reader` and prepares the record stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be read or lacks a required
    /// column. An input without any header line reports a missing column.
    pub fn new(reader: R) -> Result<Self, PartitionError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let parser = RecordParser::from_header(reader.headers()?)?;

        Ok(Self {
            records: reader.into_records(),
            parser,
            accumulator: DayAccumulator::new(),
            ticks: 0,
            done: false,
        })
    }

    /// Returns the number of ticks parsed so far.
    #[must_use]
    pub const fn ticks_read(&self) -> u64 {
        self.ticks
    }

    fn advance(&mut self) -> Result<Option<DaySegment>, PartitionError> {
        for record in self.records.by_ref() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            let tick = self.parser.parse(&record, line)?;
            self.ticks += 1;

            if let Some(segment) = self.accumulator.push(&tick) {
                return Ok(Some(segment));
            }
        }

        Ok(std::mem::take(&mut self.accumulator).finish())
    }
}

impl<R: Read> Iterator for DailyPartitioner<R> {
    type Item = Result<DaySegment, PartitionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.advance() {
            Ok(Some(segment)) if !segment.tag().is_last_tick() => Some(Ok(segment)),
            Ok(last) => {
                self.done = true;
                last.map(Ok)
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for DailyPartitioner<R> {}

/// Splits a whole bundle, stopping at the first error.
///
/// Nothing is returned for a bundle that fails part way, so callers can
/// write the result knowing every record was valid.
///
/// # Errors
///
/// Returns the first error encountered while reading the bundle.
pub fn partition_bundle<R: Read>(reader: R) -> Result<Vec<DaySegment>, PartitionError> {
    DailyPartitioner::new(reader)?.collect()
}

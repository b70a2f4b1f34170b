//! Daily segments of re-serialized tick lines.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Extension of the per-day output files.
pub const SEGMENT_EXTENSION: &str = "csv";

/// Value a [`DaySegment`] is keyed by.
///
/// Segments sealed at a day boundary are keyed by their calendar date. The
/// segment sealed at end of stream is keyed by the full timestamp of the last
/// tick. Both render the same file name since only the date components are
/// formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum SegmentTag {
    /// Sealed because a tick with a later calendar date arrived.
    Date(NaiveDate),
    /// Sealed at end of stream; carries the last tick's timestamp.
    LastTick(NaiveDateTime),
}

impl SegmentTag {
    /// Returns the calendar date the tag designates.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Date(date) => *date,
            Self::LastTick(timestamp) => timestamp.date(),
        }
    }

    /// Returns true if this is the end-of-stream tag.
    #[must_use]
    pub const fn is_last_tick(&self) -> bool {
        matches!(self, Self::LastTick(_))
    }
}

impl std::fmt::Display for SegmentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::LastTick(timestamp) => write!(f, "{}", timestamp.format("%Y-%m-%d")),
        }
    }
}

/// The ordered lines of all ticks sharing one calendar date within a bundle.
///
/// Never empty: a segment only comes into existence with its first tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySegment {
    tag: SegmentTag,
    lines: Vec<String>,
}

impl DaySegment {
    /// Seals a segment from its tag and lines.
    #[must_use]
    pub const fn new(tag: SegmentTag, lines: Vec<String>) -> Self {
        Self { tag, lines }
    }

    /// Returns the tag the segment was sealed with.
    #[must_use]
    pub const fn tag(&self) -> SegmentTag {
        self.tag
    }

    /// Returns the calendar date of the segment.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.tag.date()
    }

    /// Returns the re-serialized lines in source order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the segment, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Returns the number of lines.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the segment has no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the output file name, `YYYY-MM-DD.csv`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{SEGMENT_EXTENSION}", self.tag)
    }
}

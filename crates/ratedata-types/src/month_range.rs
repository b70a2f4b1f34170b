//! Month range and month iteration.

use chrono::{Datelike, Months, NaiveDate};

use crate::MonthRangeError;

/// An inclusive range of calendar months.
///
/// Both ends are stored as the first day of their month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    /// First month (inclusive).
    pub start: NaiveDate,
    /// Last month (inclusive).
    pub end: NaiveDate,
}

impl MonthRange {
    /// Creates a new month range, validating that start <= end.
    ///
    /// The day component of both dates is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the start month is after the end month.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, MonthRangeError> {
        let start = first_of_month(start);
        let end = first_of_month(end);
        if start > end {
            return Err(MonthRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two month strings (see [`parse_month`]).
    ///
    /// # Errors
    ///
    /// Returns an error if either month is malformed or the range is inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self, MonthRangeError> {
        Self::new(parse_month(start)?, parse_month(end)?)
    }

    /// Creates a range covering a single month.
    #[must_use]
    pub fn single_month(date: NaiveDate) -> Self {
        let month = first_of_month(date);
        Self {
            start: month,
            end: month,
        }
    }

    /// Returns an iterator over the first day of every month in the range.
    pub const fn months(&self) -> MonthIterator {
        MonthIterator {
            current: Some(self.start),
            end: self.end,
        }
    }

    /// Returns the total number of months in the range.
    ///
    /// An inverted range, only constructible through the public fields, has
    /// no months.
    #[must_use]
    pub fn total_months(&self) -> usize {
        let span = (self.end.year() - self.start.year()) * 12 + self.end.month() as i32
            - self.start.month() as i32;
        usize::try_from(span + 1).unwrap_or(0)
    }

    /// Returns true if the range contains the month of the given date.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        let month = first_of_month(date);
        month >= self.start && month <= self.end
    }
}

impl std::fmt::Display for MonthRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m"),
            self.end.format("%Y-%m")
        )
    }
}

/// Iterator over the months of a [`MonthRange`].
#[derive(Debug, Clone)]
pub struct MonthIterator {
    current: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for MonthIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let month = self.current.filter(|m| *m <= self.end)?;
        self.current = month.checked_add_months(Months::new(1));
        Some(month)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .current
            .filter(|m| *m <= self.end)
            .map_or(0, |m| MonthRange { start: m, end: self.end }.total_months());
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthIterator {}

/// Parses a month given as `YYYY-MM`, `YYYY/M` or a full `YYYY-MM-DD` date.
///
/// Returns the first day of that month.
///
/// # Errors
///
/// Returns an error if the string is not a valid month.
///
/// # Example
///
/// ```
/// use ratedata_types::parse_month;
///
/// let month = parse_month("2014/1").unwrap();
/// assert_eq!(month.to_string(), "2014-01-01");
/// ```
pub fn parse_month(s: &str) -> Result<NaiveDate, MonthRangeError> {
    let invalid = || MonthRangeError::InvalidMonth(s.to_string());
    let trimmed = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(first_of_month(date));
    }

    let (year, month) = trimmed
        .split_once(['-', '/'])
        .ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

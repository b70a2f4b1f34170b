//! Tick data representation and timestamp decoding.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timestamp rendering used in re-serialized tick lines.
///
/// Always microsecond width, regardless of the precision the source carried.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Pattern of the whole-second timestamp encoding.
pub const WHOLE_SECOND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Field separator of re-serialized tick lines.
pub const LINE_SEPARATOR: char = ';';

/// Padding characters trailing every fractional timestamp in the source bundles.
const FRACTION_PADDING: usize = 3;

/// Maximum fraction digits left once the padding is stripped.
const MAX_FRACTION_DIGITS: usize = 6;

/// Errors that can occur while decoding a bundle timestamp.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The fractional part is empty, too long, or not made of digits.
    #[error("Invalid fractional seconds in timestamp {0:?}")]
    InvalidFraction(String),

    /// The date/time part does not match `YYYY-MM-DD HH:MM:SS`.
    #[error("Timestamp {value:?} does not match {WHOLE_SECOND_FORMAT}: {source}")]
    Pattern {
        /// The offending raw value.
        value: String,
        /// The underlying chrono error.
        source: chrono::ParseError,
    },
}

/// Decodes a raw `RateDateTime` value.
///
/// Two encodings are accepted, told apart by the presence of a `.`:
///
/// - `YYYY-MM-DD HH:MM:SS.fff<pad>`: the last three characters are padding
///   and are dropped; the remaining 1 to 6 fraction digits are kept.
/// - `YYYY-MM-DD HH:MM:SS`: zero sub-second precision.
///
/// # Errors
///
/// Returns an error if the value matches neither encoding.
///
/// # Example
///
/// ```
/// use ratedata_types::parse_timestamp;
///
/// let ts = parse_timestamp("2015-03-02 23:59:59.999000001").unwrap();
/// assert_eq!(ts.to_string(), "2015-03-02 23:59:59.999");
/// ```
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, TimestampError> {
    let Some((whole, fraction)) = raw.split_once('.') else {
        return parse_whole_seconds(raw);
    };

    let digits = fraction
        .len()
        .checked_sub(FRACTION_PADDING)
        .and_then(|kept| fraction.get(..kept))
        .filter(|d| {
            (1..=MAX_FRACTION_DIGITS).contains(&d.len()) && d.bytes().all(|b| b.is_ascii_digit())
        })
        .ok_or_else(|| TimestampError::InvalidFraction(raw.to_string()))?;

    let scale = 10u32.pow((MAX_FRACTION_DIGITS - digits.len()) as u32);
    let micros = digits
        .parse::<u32>()
        .map_err(|_| TimestampError::InvalidFraction(raw.to_string()))?
        * scale;

    parse_whole_seconds(whole)?
        .with_nanosecond(micros * 1_000)
        .ok_or_else(|| TimestampError::InvalidFraction(raw.to_string()))
}

fn parse_whole_seconds(raw: &str) -> Result<NaiveDateTime, TimestampError> {
    NaiveDateTime::parse_from_str(raw, WHOLE_SECOND_FORMAT).map_err(|source| {
        TimestampError::Pattern {
            value: raw.to_string(),
            source,
        }
    })
}

/// A single bid/ask observation.
///
/// Prices keep the exact text of the source record; they are never parsed
/// as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    timestamp: NaiveDateTime,
    bid: String,
    ask: String,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub fn new(timestamp: NaiveDateTime, bid: impl Into<String>, ask: impl Into<String>) -> Self {
        Self {
            timestamp,
            bid: bid.into(),
            ask: ask.into(),
        }
    }

    /// Returns the tick timestamp, passed through without timezone conversion.
    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the calendar date of the tick.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns the bid price as written in the source.
    #[must_use]
    pub fn bid(&self) -> &str {
        &self.bid
    }

    /// Returns the ask price as written in the source.
    #[must_use]
    pub fn ask(&self) -> &str {
        &self.ask
    }

    /// Re-serializes the tick as `timestamp;bid;ask`.
    #[must_use]
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{LINE_SEPARATOR}{}{LINE_SEPARATOR}{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.bid,
            self.ask
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    #[test]
    fn test_fractional_padding_stripped() {
        let ts = parse_timestamp("2015-03-02 23:59:59.999000001").unwrap();
        assert_eq!(ts, datetime("2015-03-02 23:59:59.999"));
        assert_eq!(ts.nanosecond(), 999_000_000);
    }

    #[test]
    fn test_whole_second_form() {
        let ts = parse_timestamp("2015-03-02 23:59:59").unwrap();
        assert_eq!(ts, datetime("2015-03-02 23:59:59.000"));
        assert_eq!(ts.nanosecond(), 0);
    }

    #[test]
    fn test_short_fraction_is_right_padded() {
        // ".5" plus three padding characters
        let ts = parse_timestamp("2015-03-02 10:00:00.5000").unwrap();
        assert_eq!(ts.nanosecond(), 500_000_000);
    }

    #[test]
    fn test_fraction_without_digits_rejected() {
        assert!(matches!(
            parse_timestamp("2015-03-02 10:00:00.123"),
            Err(TimestampError::InvalidFraction(_))
        ));
        assert!(matches!(
            parse_timestamp("2015-03-02 10:00:00."),
            Err(TimestampError::InvalidFraction(_))
        ));
    }

    #[test]
    fn test_fraction_too_long_rejected() {
        assert!(parse_timestamp("2015-03-02 10:00:00.1234567000").is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            parse_timestamp("not a timestamp"),
            Err(TimestampError::Pattern { .. })
        ));
        assert!(parse_timestamp("2015/03/02 10:00:00").is_err());
        assert!(parse_timestamp("2015-03-02 10:00:00.12x000").is_err());
    }

    #[test]
    fn test_line_rendering_is_microsecond_width() {
        let tick = Tick::new(datetime("2015-03-02 23:59:59"), "1.12345", "1.12360");
        assert_eq!(tick.to_line(), "2015-03-02 23:59:59.000000;1.12345;1.12360");

        let tick = Tick::new(datetime("2015-03-02 08:01:02.25"), "120.1", "120.130");
        assert_eq!(tick.to_line(), "2015-03-02 08:01:02.250000;120.1;120.130");
    }

    #[test]
    fn test_prices_are_kept_verbatim() {
        let tick = Tick::new(datetime("2015-03-02 00:00:00"), "1.10000", " 1.1E0");
        assert_eq!(tick.bid(), "1.10000");
        assert_eq!(tick.ask(), " 1.1E0");
    }

    #[test]
    fn test_line_reparses_to_the_second() {
        let original = parse_timestamp("2015-03-02 13:45:07.123456000").unwrap();
        let line = Tick::new(original, "1", "2").to_line();
        let reparsed = parse_timestamp(&line[..19]).unwrap();

        assert_eq!(reparsed.date(), original.date());
        assert_eq!(reparsed.time().hour(), original.time().hour());
        assert_eq!(reparsed.time().minute(), original.time().minute());
        assert_eq!(reparsed.time().second(), original.time().second());
    }
}

//! Core types for ratedata tick archive splitter.
//!
//! This crate provides the fundamental data structures used throughout ratedata:
//!
//! - [`Tick`] - A timestamped bid/ask observation with prices kept as source text
//! - [`DaySegment`] - The re-serialized lines of one calendar day
//! - [`Symbol`] - Currency pair identifier
//! - [`MonthRange`] - Month range for data retrieval
//! - [`BundleKey`] - One weekly archive of one symbol

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ratedata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bundle;
mod error;
mod month_range;
mod segment;
mod symbol;
mod tick;

pub use bundle::{BundleKey, WEEKS_PER_MONTH, bundle_plan};
pub use error::{MonthRangeError, RatedataError, Result};
pub use month_range::{MonthIterator, MonthRange, parse_month};
pub use segment::{DaySegment, SEGMENT_EXTENSION, SegmentTag};
pub use symbol::{Symbol, SymbolError, parse_symbols};
pub use tick::{
    LINE_SEPARATOR, TIMESTAMP_FORMAT, TimestampError, Tick, WHOLE_SECOND_FORMAT, parse_timestamp,
};

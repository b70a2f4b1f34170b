//! Record parsing and daily partitioning for ratedata tick archive splitter.
//!
//! This crate holds the only part of ratedata that inspects bundle contents:
//!
//! - [`RecordParser`] - Turns one CSV record into a [`Tick`](ratedata_types::Tick)
//! - [`DayAccumulator`] - Buffers lines until a day boundary
//! - [`DailyPartitioner`] - Streams a bundle as a sequence of day segments
//! - [`partition_bundle`] - Collects a whole bundle, all or nothing
//!
//! It performs no filesystem or network access.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ratedata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod partitioner;
mod record;

pub use error::{MalformedReason, PartitionError};
pub use partitioner::{DailyPartitioner, DayAccumulator, partition_bundle};
pub use record::{ASK_COLUMN, BID_COLUMN, ColumnIndex, RecordParser, TIMESTAMP_COLUMN};

//! Acquisition loop for ratedata tick archive splitter.
//!
//! - [`process_bundle`] - Extract, partition and write one archive
//! - [`Acquisition`] - Runs a bundle plan against a [`BundleSource`](ratedata_fetch::BundleSource)
//! - [`RunReport`] - Per-bundle outcomes of a run

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ratedata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod outcome;
mod pipeline;
mod process;

pub use outcome::{RunReport, SkipReason, UnitOutcome, UnitStatus};
pub use pipeline::{AcquireConfig, Acquisition};
pub use process::{BundleError, BundleSummary, process_bundle, write_partitioned};

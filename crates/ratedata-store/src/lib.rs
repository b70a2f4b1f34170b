//! On-disk layout and segment writer for ratedata tick archive splitter.
//!
//! - [`DataLayout`] - Maps symbols and segments to paths below a data root
//! - [`SegmentWriter`] - Atomically writes one day segment

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ratedata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod layout;
mod writer;

pub use error::StoreError;
pub use layout::DataLayout;
pub use writer::SegmentWriter;

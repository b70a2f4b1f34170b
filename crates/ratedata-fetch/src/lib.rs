//! HTTP client and archive handling for ratedata tick archive splitter.
//!
//! This crate provides the bundle acquisition side of ratedata:
//!
//! - [`url::bundle_url`] - Constructs rate data archive URLs
//! - [`DownloadClient`] - HTTP client with connection pooling and retries
//! - [`DirectorySource`] - Reads bundles from a local mirror
//! - [`BundleSource`] - The seam both of them implement
//! - [`extract_single_member`] - Zip extraction of a bundle's only file

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ratedata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod archive;
mod client;
mod source;
pub mod url;

pub use archive::{ArchiveError, ArchiveMember, extract_single_member};
pub use client::{ClientConfig, DownloadClient, DownloadError};
pub use source::{BundleSource, DirectorySource};

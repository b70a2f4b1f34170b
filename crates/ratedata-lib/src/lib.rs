//! Split GAIN Capital weekly tick archives into per-day files.
//!
//! This is a facade crate that re-exports functionality from the ratedata
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use ratedata_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let symbols = parse_symbols(["EUR_USD", "usd/jpy"])?;
//!     let months = MonthRange::parse("2015-01", "2015-03")?;
//!
//!     let acquisition = Acquisition::new(
//!         DownloadClient::with_defaults()?,
//!         DataLayout::new("data"),
//!         4,
//!     );
//!     let report = acquisition.run(bundle_plan(&months, &symbols)).await;
//!     println!("{} bundles written, {} skipped", report.written(), report.skipped());
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ratedata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use ratedata_types::*;

// Re-export the partitioning core
pub use ratedata_partition::{
    DailyPartitioner, DayAccumulator, MalformedReason, PartitionError, RecordParser,
    partition_bundle,
};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use ratedata_fetch::{
    ArchiveError, BundleSource, ClientConfig, DirectorySource, DownloadClient, DownloadError,
    extract_single_member, url,
};

// Re-export storage
#[cfg(feature = "store")]
pub use ratedata_store::{DataLayout, SegmentWriter, StoreError};

// Re-export the acquisition loop
#[cfg(feature = "acquire")]
pub use ratedata_acquire::{
    AcquireConfig, Acquisition, BundleError, BundleSummary, RunReport, SkipReason, UnitOutcome,
    UnitStatus, process_bundle, write_partitioned,
};

/// Prelude module for convenient imports.
///
/// ```
/// use ratedata_lib::prelude::*;
/// ```
pub mod prelude {
    pub use ratedata_types::{
        BundleKey, DaySegment, MonthRange, RatedataError, Result, SegmentTag, Symbol, Tick,
        bundle_plan, parse_symbols,
    };

    pub use ratedata_partition::{DailyPartitioner, partition_bundle};

    #[cfg(feature = "fetch")]
    pub use ratedata_fetch::{BundleSource, ClientConfig, DirectorySource, DownloadClient};

    #[cfg(feature = "store")]
    pub use ratedata_store::{DataLayout, SegmentWriter};

    #[cfg(feature = "acquire")]
    pub use ratedata_acquire::{AcquireConfig, Acquisition, RunReport, SkipReason, UnitOutcome};
}

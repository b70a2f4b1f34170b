//! Transform of a single bundle: extract, partition, write.

use ratedata_fetch::{ArchiveError, extract_single_member};
use ratedata_partition::{PartitionError, partition_bundle};
use ratedata_store::{SegmentWriter, StoreError};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::SkipReason;

/// Errors that abort a single bundle.
#[derive(Error, Debug)]
pub enum BundleError {
    /// The archive could not be unpacked.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The bundle contents could not be partitioned.
    #[error(transparent)]
    Partition(#[from] PartitionError),

    /// A day file could not be written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The blocking transform task did not complete.
    #[error("transform task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl BundleError {
    /// Returns how the failure is reported.
    #[must_use]
    pub const fn skip_reason(&self) -> SkipReason {
        match self {
            Self::Archive(_) => SkipReason::Archive,
            Self::Partition(_) => SkipReason::Malformed,
            Self::Store(_) | Self::Task(_) => SkipReason::Store,
        }
    }
}

/// Result of a successfully processed bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleSummary {
    /// Name of the archive member, empty for plain CSV input.
    pub member: String,
    /// Number of ticks read.
    pub ticks: usize,
    /// Day files written, in date order.
    pub files: Vec<PathBuf>,
}

impl BundleSummary {
    /// Returns the number of day segments written.
    #[must_use]
    pub const fn segments(&self) -> usize {
        self.files.len()
    }
}

/// Extracts a zipped bundle and writes its day files into `symbol_dir`.
///
/// # Errors
///
/// Returns an error if the archive is unusable, the contents are malformed,
/// or a file cannot be written. Nothing is written unless the whole bundle
/// partitions cleanly.
pub fn process_bundle(
    bytes: &[u8],
    symbol_dir: &Path,
    writer: &SegmentWriter,
) -> Result<BundleSummary, BundleError> {
    let member = extract_single_member(bytes)?;
    let mut summary = write_partitioned(&member.data, symbol_dir, writer)?;
    summary.member = member.name;
    Ok(summary)
}

/// Partitions uncompressed bundle contents and writes the day files.
///
/// # Errors
///
/// Returns an error if the contents are malformed or a file cannot be
/// written. A malformed bundle writes nothing.
pub fn write_partitioned(
    csv: &[u8],
    symbol_dir: &Path,
    writer: &SegmentWriter,
) -> Result<BundleSummary, BundleError> {
    let segments = partition_bundle(csv)?;

    let mut summary = BundleSummary {
        ticks: segments.iter().map(|s| s.len()).sum(),
        files: Vec::with_capacity(segments.len()),
        ..Default::default()
    };
    for segment in &segments {
        summary.files.push(writer.write_segment(symbol_dir, segment)?);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    const BUNDLE: &str = "lTid,cDealable,CurrencyPair,RateDateTime,RateBid,RateAsk
1,D,EUR/USD,2015-03-02 23:59:58.500000000,1.11804,1.11822
2,D,EUR/USD,2015-03-02 23:59:59.999000001,1.11805,1.11823
3,D,EUR/USD,2015-03-03 00:00:00,1.11806,1.11824
";

    fn zipped(files: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in files {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_process_bundle_writes_days() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zipped(&[("EUR_USD_Week1.csv", BUNDLE)]);

        let summary = process_bundle(&bytes, dir.path(), &SegmentWriter::new()).unwrap();

        assert_eq!(summary.member, "EUR_USD_Week1.csv");
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.segments(), 2);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("2015-03-02.csv")).unwrap(),
            "2015-03-02 23:59:58.500000;1.11804;1.11822\n2015-03-02 23:59:59.999000;1.11805;1.11823\n"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("2015-03-03.csv")).unwrap(),
            "2015-03-03 00:00:00.000000;1.11806;1.11824\n"
        );
    }

    #[test]
    fn test_malformed_bundle_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let broken = format!("{BUNDLE}4,D,EUR/USD,not a time,1.1,1.2\n");

        let err =
            write_partitioned(broken.as_bytes(), dir.path(), &SegmentWriter::new()).unwrap_err();

        assert_eq!(err.skip_reason(), SkipReason::Malformed);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_two_members_is_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zipped(&[("a.csv", BUNDLE), ("b.csv", BUNDLE)]);

        let err = process_bundle(&bytes, dir.path(), &SegmentWriter::new()).unwrap_err();
        assert_eq!(err.skip_reason(), SkipReason::Archive);
    }

    #[test]
    fn test_header_only_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let summary = write_partitioned(
            b"RateDateTime,RateBid,RateAsk\n",
            dir.path(),
            &SegmentWriter::new(),
        )
        .unwrap();

        assert_eq!(summary.segments(), 0);
        assert_eq!(summary.ticks, 0);
    }

    #[test]
    fn test_missing_directory_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_partitioned(
            BUNDLE.as_bytes(),
            &dir.path().join("absent"),
            &SegmentWriter::new(),
        )
        .unwrap_err();

        assert_eq!(err.skip_reason(), SkipReason::Store);
    }
}

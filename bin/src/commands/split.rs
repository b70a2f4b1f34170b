//! Split command implementation.
//!
//! Partitions a bundle that is already on disk.

use anyhow::{Context, Result};
use ratedata_lib::prelude::*;
use ratedata_lib::{process_bundle, write_partitioned};
use std::path::{Path, PathBuf};

/// Local file headers and the empty-archive trailer both start with `PK`.
fn is_zip(bytes: &[u8]) -> bool {
    bytes.starts_with(b"PK\x03\x04") || bytes.starts_with(b"PK\x05\x06")
}

/// Split one local bundle, zipped or plain, into day files.
pub(crate) fn split(input: &Path, symbol: &str, data_root: PathBuf, quiet: bool) -> Result<()> {
    let symbol: Symbol = symbol.parse()?;
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let layout = DataLayout::new(data_root);
    let dir = layout.ensure_symbol_dir(&symbol)?;
    let writer = SegmentWriter::new();

    let summary = if is_zip(&bytes) {
        process_bundle(&bytes, &dir, &writer)
    } else {
        write_partitioned(&bytes, &dir, &writer)
    }
    .with_context(|| format!("Failed to split {}", input.display()))?;

    tracing::info!(
        symbol = %symbol,
        path = %input.display(),
        segments = summary.segments(),
        ticks = summary.ticks,
        "bundle split"
    );

    if !quiet {
        println!(
            "Wrote {} day files ({} ticks) to {}",
            summary.segments(),
            summary.ticks,
            dir.display()
        );
        for file in &summary.files {
            println!("  {}", file.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zip() {
        assert!(is_zip(b"PK\x03\x04rest"));
        assert!(is_zip(b"PK\x05\x06"));
        assert!(!is_zip(b"RateDateTime,RateBid,RateAsk"));
        assert!(!is_zip(b""));
    }

    #[test]
    fn test_split_plain_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("AUD_USD_Week2.csv");
        std::fs::write(
            &input,
            "RateDateTime,RateBid,RateAsk\n\
             2014-01-06 23:59:59.500000000,0.89001,0.89019\n\
             2014-01-07 00:00:00,0.89002,0.89020\n",
        )
        .unwrap();

        split(&input, "aud/usd", dir.path().join("out"), true).unwrap();

        let symbol_dir = dir.path().join("out/AUD_USD");
        assert_eq!(
            std::fs::read_to_string(symbol_dir.join("2014-01-06.csv")).unwrap(),
            "2014-01-06 23:59:59.500000;0.89001;0.89019\n"
        );
        assert!(symbol_dir.join("2014-01-07.csv").is_file());
    }

    #[test]
    fn test_split_rejects_unknown_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = split(&dir.path().join("absent.zip"), "EUR_USD", dir.path().into(), true);
        assert!(err.is_err());
    }
}

//! Atomic segment writer.

use ratedata_types::DaySegment;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::StoreError;

/// Writes day segments as newline-terminated text files.
///
/// Each write goes to a temporary file in the target directory which is then
/// renamed over `<dir>/<YYYY-MM-DD>.csv`. An existing file for the same day is
/// replaced, so rewriting a segment is idempotent.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentWriter {
    sync: bool,
}

impl SegmentWriter {
    /// Creates a writer that does not fsync.
    #[must_use]
    pub const fn new() -> Self {
        Self { sync: false }
    }

    /// Sets whether file contents are flushed to disk before the rename.
    #[must_use]
    pub const fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Returns true if writes are synced before the rename.
    #[must_use]
    pub const fn syncs(&self) -> bool {
        self.sync
    }

    /// Writes `segment` into `dir`, returning the final path.
    ///
    /// `dir` must exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the temporary file cannot be created
    /// or written, and [`StoreError::Persist`] if it cannot be renamed.
    pub fn write_segment(&self, dir: &Path, segment: &DaySegment) -> Result<PathBuf, StoreError> {
        let path = dir.join(segment.file_name());
        let write_error = |source: std::io::Error| StoreError::Write {
            path: path.clone(),
            source,
        };

        let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
        {
            let mut out = BufWriter::new(file.as_file_mut());
            for line in segment.lines() {
                out.write_all(line.as_bytes()).map_err(write_error)?;
                out.write_all(b"\n").map_err(write_error)?;
            }
            out.flush().map_err(write_error)?;
        }
        if self.sync {
            file.as_file().sync_all().map_err(write_error)?;
        }

        file.persist(&path).map_err(|e| StoreError::Persist {
            path: path.clone(),
            source: e.error,
        })?;

        tracing::debug!(path = %path.display(), lines = segment.len(), "segment written");
        Ok(path)
    }
}

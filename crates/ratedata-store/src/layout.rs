//! Data root layout.

use chrono::NaiveDate;
use ratedata_types::{DaySegment, SEGMENT_EXTENSION, Symbol};
use std::path::{Path, PathBuf};

use crate::StoreError;

/// Layout of the output tree: `<root>/<SYMBOL>/<YYYY-MM-DD>.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    /// Creates a layout rooted at `root`. Nothing is created on disk.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the data root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory holding a symbol's day files.
    #[must_use]
    pub fn symbol_dir(&self, symbol: &Symbol) -> PathBuf {
        self.root.join(symbol.as_str())
    }

    /// Creates the symbol directory (and the root) if missing, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CreateDir`] if the directory cannot be created.
    pub fn ensure_symbol_dir(&self, symbol: &Symbol) -> Result<PathBuf, StoreError> {
        let dir = self.symbol_dir(symbol);
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(dir)
    }

    /// Returns the path a segment of `symbol` is written to.
    #[must_use]
    pub fn segment_path(&self, symbol: &Symbol, segment: &DaySegment) -> PathBuf {
        self.symbol_dir(symbol).join(segment.file_name())
    }

    /// Returns the days already stored for `symbol`, sorted.
    ///
    /// A missing symbol directory yields an empty list. Files whose names are
    /// not `YYYY-MM-DD.csv` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ReadDir`] if the directory exists but cannot be listed.
    pub fn stored_days(&self, symbol: &Symbol) -> Result<Vec<NaiveDate>, StoreError> {
        let dir = self.symbol_dir(symbol);
        let read_dir_error = |source: std::io::Error| StoreError::ReadDir {
            path: dir.clone(),
            source,
        };

        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(read_dir_error(e)),
        };

        let mut days = Vec::new();
        for entry in entries {
            let path = entry.map_err(read_dir_error)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SEGMENT_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if let Ok(day) = NaiveDate::parse_from_str(stem, "%Y-%m-%d") {
                days.push(day);
            }
        }
        days.sort_unstable();
        Ok(days)
    }
}

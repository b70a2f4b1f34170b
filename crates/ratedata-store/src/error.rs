//! Storage errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing segments.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A directory could not be created.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing segment contents failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Final path of the segment.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The temporary file could not be moved into place.
    #[error("Failed to persist {path}: {source}")]
    Persist {
        /// Final path of the segment.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A directory listing failed.
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        /// Directory that was being listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl StoreError {
    /// Returns the path the failed operation targeted.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::CreateDir { path, .. }
            | Self::Write { path, .. }
            | Self::Persist { path, .. }
            | Self::ReadDir { path, .. } => path,
        }
    }
}

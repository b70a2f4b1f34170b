//! Sources of raw bundle archives.

use async_trait::async_trait;
use bytes::Bytes;
use ratedata_types::BundleKey;
use std::path::{Path, PathBuf};

use crate::DownloadError;

/// Something that can produce the raw archive of a weekly bundle.
#[async_trait]
pub trait BundleSource: Send + Sync {
    /// Fetches the archive for `key`.
    ///
    /// Returns `Ok(None)` if the bundle does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundle exists but could not be retrieved.
    async fn fetch(&self, key: &BundleKey) -> Result<Option<Bytes>, DownloadError>;
}

/// Reads bundles from a local mirror of the archive.
///
/// The mirror uses the remote layout: `{root}/{YEAR}/{MM} {MonthName}/{SYMBOL}_Week{N}.zip`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source reading below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the mirror root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path a bundle is read from.
    #[must_use]
    pub fn path_for(&self, key: &BundleKey) -> PathBuf {
        self.root
            .join(key.year.to_string())
            .join(format!("{:02} {}", key.month, key.month_name()))
            .join(format!("{}_Week{}.zip", key.symbol, key.week))
    }
}

#[async_trait]
impl BundleSource for DirectorySource {
    async fn fetch(&self, key: &BundleKey) -> Result<Option<Bytes>, DownloadError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DownloadError::Io(e)),
        }
    }
}

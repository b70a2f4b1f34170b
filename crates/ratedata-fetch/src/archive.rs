//! Zip extraction for weekly bundles.

use std::io::{Cursor, Read};
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

/// Errors that can occur during extraction.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Empty input data.
    #[error("Empty input data")]
    EmptyInput,

    /// The data is not a readable zip archive.
    #[error("Invalid zip archive: {0}")]
    Zip(#[from] ZipError),

    /// The archive does not hold exactly one file.
    #[error("Expected exactly 1 file in archive, found {0}")]
    MemberCount(usize),

    /// Reading the member failed.
    #[error("Failed to read archive member: {0}")]
    Io(#[from] std::io::Error),
}

/// The single file of a bundle archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// File name inside the archive.
    pub name: String,
    /// Uncompressed contents.
    pub data: Vec<u8>,
}

/// Extracts the only file of a bundle archive into memory.
///
/// Directory entries are not counted as files.
///
/// # Errors
///
/// Returns an error if the data is not a zip archive or does not contain
/// exactly one file.
pub fn extract_single_member(compressed: &[u8]) -> Result<ArchiveMember, ArchiveError> {
    if compressed.is_empty() {
        return Err(ArchiveError::EmptyInput);
    }

    let mut archive = ZipArchive::new(Cursor::new(compressed))?;

    let mut files = Vec::with_capacity(1);
    for index in 0..archive.len() {
        if !archive.by_index(index)?.is_dir() {
            files.push(index);
        }
    }
    let [index] = files.as_slice() else {
        return Err(ArchiveError::MemberCount(files.len()));
    };

    let mut file = archive.by_index(*index)?;
    let name = file.name().to_string();
    let mut data = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
    file.read_to_end(&mut data)?;

    Ok(ArchiveMember { name, data })
}

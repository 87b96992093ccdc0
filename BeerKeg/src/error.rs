//! Error types for `BeerKeg`

use std::path::PathBuf;

use thiserror::Error;

/// Broad classification of an [`Error`].
///
/// `Io` covers everything that went wrong talking to the source or the sink
/// (including offsets that point past the end of the source); `Format` covers
/// bytes that were read fine but do not describe a valid archive or sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
}

/// The error type for `BeerKeg` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from source reads and seeks.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An entry's payload lies (partly) outside the source.
    #[error("entry '{name}' out of range: {size} bytes at offset {offset} exceed source length {source_len}")]
    OutOfRange {
        /// Trimmed entry name.
        name: String,
        /// Absolute payload offset.
        offset: u64,
        /// Declared payload size.
        size: u64,
        /// Total length of the source.
        source_len: u64,
    },

    /// The output sink rejected a write.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        /// Destination path (relative to the sink root).
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    // ==================== Archive Format Errors ====================
    /// The source does not start with the combiner magic string.
    #[error("not a combiner archive: wrong type ID string {found:?}")]
    BadMagic {
        /// The bytes found where the magic was expected (may be short).
        found: String,
    },

    /// The directory table is shorter than the declared item count requires.
    #[error("directory truncated: {declared} entries need {needed} bytes, only {available} available")]
    TruncatedDirectory {
        /// Item count from the header.
        declared: u16,
        /// Bytes required for the whole table.
        needed: u64,
        /// Bytes left in the source after the header.
        available: u64,
    },

    /// An entry name cannot be used as an output file name.
    #[error("invalid entry name: {0:?}")]
    InvalidEntryName(String),

    // ==================== Sound Format Errors ====================
    /// The multi-sample prologue (count and per-sample table) is truncated.
    #[error("sound '{name}': sample table truncated ({needed} bytes needed, {available} available)")]
    TruncatedSampleTable {
        /// Entry name.
        name: String,
        /// Bytes required by the prologue.
        needed: usize,
        /// Bytes available in the entry.
        available: usize,
    },

    /// A sample record header or payload runs past the end of its container.
    #[error("sound '{name}': sample {index} truncated ({needed} bytes needed, {available} available)")]
    TruncatedSample {
        /// Entry name.
        name: String,
        /// Zero-based record index.
        index: usize,
        /// Bytes required by the record (header or payload).
        needed: usize,
        /// Bytes left in the container.
        available: usize,
    },
}

impl Error {
    /// Classify this error as an IO or a format problem.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) | Error::OutOfRange { .. } | Error::WriteFailed { .. } => ErrorKind::Io,
            Error::BadMagic { .. }
            | Error::TruncatedDirectory { .. }
            | Error::InvalidEntryName(_)
            | Error::TruncatedSampleTable { .. }
            | Error::TruncatedSample { .. } => ErrorKind::Format,
        }
    }
}

/// A specialized Result type for `BeerKeg` operations.
pub type Result<T> = std::result::Result<T, Error>;

//! # BeerKeg
//!
//! A pure-Rust extractor for Alpha-Helix "combiner" data archives (`BEER.DAT`).
//!
//! ## Supported Formats
//!
//! - **Combiner archives** - Magic-tagged header plus a flat directory of
//!   fixed 24-byte records pointing at absolute offsets
//! - **SND containers** - One or more sample records, raw 8-bit PCM or
//!   4-bit ADPCM, decoded to mono 8-bit WAVE files
//!
//! ## Quick Start
//!
//! ```no_run
//! use beerkeg::archive::ArchiveOperations;
//!
//! // List the directory
//! let directory = ArchiveOperations::list("BEER.DAT")?;
//! println!("Found {} entries", directory.entries.len());
//!
//! // Extract everything, decoding sounds into beer/snd
//! let summary = ArchiveOperations::extract("BEER.DAT", "beer")?;
//! println!("{} samples decoded", summary.samples_decoded());
//! # Ok::<(), beerkeg::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `beerkeg` command-line binary

pub mod archive;
pub mod error;
pub mod formats;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};

    pub use crate::archive::{
        ArchiveDirectory, ArchiveOperations, ArchiveReader, DirectoryEntry, ExtractionOptions,
        ExtractionSummary, OutputSink,
    };
    pub use crate::formats::snd::{DecodedSample, SoundContainer, decode_adpcm};
    pub use crate::formats::wav::encode_wav;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

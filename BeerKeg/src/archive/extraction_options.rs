//! Extraction options
//!
//! Runtime switches for [`ArchiveOperations`](super::ArchiveOperations).
//! Parsing and decoding never look at these; they only decide what gets
//! written where and how failures are handled.

use std::path::PathBuf;

/// Default output root, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "beer";

/// Default subdirectory (under the output root) for decoded samples
pub const DEFAULT_SOUND_DIR: &str = "snd";

/// Options for archive extraction.
///
/// # Example
///
/// ```
/// use beerkeg::archive::ExtractionOptions;
///
/// let options = ExtractionOptions::new()
///     .with_dry_run(true)
///     .with_best_effort(true);
/// assert!(options.decode_sounds);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    /// Parse and decode everything but write nothing
    pub dry_run: bool,

    /// Decode SND entries into WAV files
    /// Default: true
    pub decode_sounds: bool,

    /// Log and skip entries that fail instead of aborting the whole run
    /// Default: false
    pub best_effort: bool,

    /// Process entries on the rayon thread pool, one archive handle per worker
    /// Default: false (table order, single thread)
    pub parallel: bool,

    /// Subdirectory of the output root for decoded samples
    pub sound_dir: PathBuf,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionOptions {
    /// Create options matching the classic unpacker: write everything,
    /// decode sounds, stop at the first error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dry_run: false,
            decode_sounds: true,
            best_effort: false,
            parallel: false,
            sound_dir: PathBuf::from(DEFAULT_SOUND_DIR),
        }
    }

    /// Set whether to skip all writes.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set whether to decode SND entries.
    #[must_use]
    pub fn with_decode_sounds(mut self, decode: bool) -> Self {
        self.decode_sounds = decode;
        self
    }

    /// Set whether failing entries are skipped rather than fatal.
    #[must_use]
    pub fn with_best_effort(mut self, best_effort: bool) -> Self {
        self.best_effort = best_effort;
        self
    }

    /// Set whether entries are processed in parallel.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the sample output subdirectory.
    #[must_use]
    pub fn with_sound_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sound_dir = dir.into();
        self
    }
}

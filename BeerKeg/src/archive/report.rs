//! Results of extraction runs

use std::path::PathBuf;
use std::time::Duration;

use crate::formats::snd::SampleCodec;

/// One decoded sample written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleReport {
    /// Output path relative to the output root
    pub path: PathBuf,
    /// Size of the stored (encoded) payload
    pub data_size: usize,
    /// Number of PCM samples after decoding
    pub pcm_len: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
    pub codec: SampleCodec,
}

/// One archive entry processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub name: String,
    pub size: u32,
    pub flags: u16,
    /// Decoded samples (empty for non-sound entries)
    pub samples: Vec<SampleReport>,
    /// Bytes handed to the sink for this entry, samples included
    pub bytes_written: u64,
}

/// Summary of an extraction run
#[derive(Debug, Clone, Default)]
pub struct ExtractionSummary {
    /// Entries in table order
    pub entries: Vec<EntryReport>,
    /// Entries skipped in best-effort mode (name, error message)
    pub failures: Vec<(String, String)>,
    pub elapsed: Duration,
}

impl ExtractionSummary {
    /// Number of entries extracted
    #[must_use]
    pub fn entries_extracted(&self) -> usize {
        self.entries.len()
    }

    /// Number of samples decoded across all entries
    #[must_use]
    pub fn samples_decoded(&self) -> usize {
        self.entries.iter().map(|e| e.samples.len()).sum()
    }

    /// Bytes handed to the sink across all entries
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.entries.iter().map(|e| e.bytes_written).sum()
    }

    /// Returns true if no entry failed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

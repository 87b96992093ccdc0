//! Combiner archive operations module

pub mod combiner;
mod extraction_options;
mod operations;
mod report;
mod sink;

// Primary public API
pub use operations::{ArchiveOperations, ProgressCallback, process_entry};

pub use combiner::{
    ArchiveDirectory, ArchiveHeader, ArchivePhase, ArchiveProgress, ArchiveReader, DirectoryEntry,
};
pub use extraction_options::{DEFAULT_OUTPUT_DIR, DEFAULT_SOUND_DIR, ExtractionOptions};
pub use report::{EntryReport, ExtractionSummary, SampleReport};
pub use sink::{DirectorySink, DryRunSink, MemorySink, OutputSink};

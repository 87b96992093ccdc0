//! Core archive operations

use std::io::{Cursor, Read, Seek};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use super::combiner::{
    ArchiveDirectory, ArchivePhase, ArchiveProgress, ArchiveReader, DirectoryEntry,
};
use super::{
    DirectorySink, DryRunSink, EntryReport, ExtractionOptions, ExtractionSummary, OutputSink,
    SampleReport,
};
use crate::error::Result;
use crate::formats::snd::SoundContainer;
use crate::utils::validate_entry_name;

/// Progress callback for archive operations.
///
/// Receives an [`ArchiveProgress`] struct with phase, current/total counts, and optional entry name.
/// Must be `Sync + Send` to support parallel extraction.
///
/// # Example
/// ```no_run
/// use beerkeg::archive::{ArchiveOperations, ArchivePhase, ExtractionOptions};
///
/// let options = ExtractionOptions::new();
/// ArchiveOperations::extract_with_options("BEER.DAT", "beer", &options, &|progress| {
///     if progress.phase == ArchivePhase::ExtractingEntries {
///         println!("{}/{}: {:?}", progress.current, progress.total, progress.current_file);
///     }
/// })?;
/// # Ok::<(), beerkeg::Error>(())
/// ```
pub type ProgressCallback<'a> = &'a (dyn Fn(&ArchiveProgress) + Sync + Send);

/// High-level archive operations.
pub struct ArchiveOperations;

impl ArchiveOperations {
    /// Read the header and directory of an archive without extracting anything
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the archive cannot be opened or read.
    /// Returns [`Error::BadMagic`] if the file is not a combiner archive.
    /// Returns [`Error::TruncatedDirectory`] if the directory is cut short.
    ///
    /// [`Error::Io`]: crate::Error::Io
    /// [`Error::BadMagic`]: crate::Error::BadMagic
    /// [`Error::TruncatedDirectory`]: crate::Error::TruncatedDirectory
    pub fn list<P: AsRef<Path>>(archive_path: P) -> Result<ArchiveDirectory> {
        ArchiveReader::open(archive_path)?.read_directory()
    }

    /// Extract an archive to a directory with default options
    ///
    /// Every entry lands in `output_dir`, decoded samples in `output_dir/snd`.
    pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
        archive_path: P,
        output_dir: Q,
    ) -> Result<ExtractionSummary> {
        Self::extract_with_options(archive_path, output_dir, &ExtractionOptions::default(), &|_| {})
    }

    /// Extract an archive to a directory
    ///
    /// With `dry_run` set nothing is written (not even `output_dir` is
    /// created). With `parallel` set, entries are processed on the rayon pool,
    /// each worker reading through its own file handle.
    ///
    /// # Errors
    ///
    /// Any error aborts the run unless `best_effort` is set, in which case
    /// failing entries are listed in [`ExtractionSummary::failures`].
    /// Errors reading the header or directory are always fatal.
    pub fn extract_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
        archive_path: P,
        output_dir: Q,
        options: &ExtractionOptions,
        progress: ProgressCallback,
    ) -> Result<ExtractionSummary> {
        let archive_path = archive_path.as_ref();

        if options.dry_run {
            let sink = DryRunSink::new();
            let summary = Self::extract_path_to_sink(archive_path, &sink, options, progress)?;
            tracing::info!(
                "Dry run: {} files ({} bytes) not written",
                sink.files(),
                sink.bytes()
            );
            return Ok(summary);
        }

        let sink = DirectorySink::new(output_dir.as_ref());
        Self::extract_path_to_sink(archive_path, &sink, options, progress)
    }

    /// Extract an in-memory archive into a sink (always sequential)
    pub fn extract_bytes(
        archive: &[u8],
        sink: &dyn OutputSink,
        options: &ExtractionOptions,
    ) -> Result<ExtractionSummary> {
        let mut reader = ArchiveReader::new(Cursor::new(archive));
        Self::extract_to_sink(&mut reader, sink, options, &|_| {})
    }

    /// Extract every entry from `reader` into `sink`, in table order
    pub fn extract_to_sink<R: Read + Seek>(
        reader: &mut ArchiveReader<R>,
        sink: &dyn OutputSink,
        options: &ExtractionOptions,
        progress: ProgressCallback,
    ) -> Result<ExtractionSummary> {
        let start = Instant::now();
        let directory = scan_directory(reader, progress)?;
        let total = directory.entries.len();

        let mut summary = ExtractionSummary::default();
        for (i, entry) in directory.entries.iter().enumerate() {
            progress(&ArchiveProgress::with_file(
                ArchivePhase::ExtractingEntries,
                i + 1,
                total,
                entry.name.clone(),
            ));

            let outcome = reader
                .extract(entry)
                .and_then(|data| process_entry(entry, &data, sink, options));
            record_outcome(&mut summary, entry, outcome, options.best_effort)?;
        }

        summary.elapsed = start.elapsed();
        progress(&ArchiveProgress::new(ArchivePhase::Complete, total, total));
        Ok(summary)
    }

    fn extract_path_to_sink(
        archive_path: &Path,
        sink: &dyn OutputSink,
        options: &ExtractionOptions,
        progress: ProgressCallback,
    ) -> Result<ExtractionSummary> {
        let mut reader = ArchiveReader::open(archive_path)?;
        if !options.parallel {
            return Self::extract_to_sink(&mut reader, sink, options, progress);
        }

        let start = Instant::now();
        let directory = scan_directory(&mut reader, progress)?;
        let total = directory.entries.len();
        let processed = AtomicUsize::new(0);

        // Each entry opens its own handle, so positioned reads never share a cursor
        let extract_one = |entry: &DirectoryEntry| -> Result<EntryReport> {
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&ArchiveProgress::with_file(
                ArchivePhase::ExtractingEntries,
                current,
                total,
                entry.name.clone(),
            ));

            let data = ArchiveReader::open(archive_path)?.extract(entry)?;
            process_entry(entry, &data, sink, options)
        };

        let mut summary = ExtractionSummary::default();
        if options.best_effort {
            let outcomes: Vec<Result<EntryReport>> =
                directory.entries.par_iter().map(extract_one).collect();
            for (entry, outcome) in directory.entries.iter().zip(outcomes) {
                record_outcome(&mut summary, entry, outcome, true)?;
            }
        } else {
            summary.entries = directory
                .entries
                .par_iter()
                .map(extract_one)
                .collect::<Result<Vec<_>>>()?;
        }

        summary.elapsed = start.elapsed();
        progress(&ArchiveProgress::new(ArchivePhase::Complete, total, total));
        Ok(summary)
    }
}

/// Write one entry's raw bytes and, for sound entries, its decoded samples
///
/// The raw entry is written first under its own name; each sample record
/// then goes to `options.sound_dir` as a WAV file.
///
/// # Errors
///
/// Returns [`Error::InvalidEntryName`] before writing anything if the name
/// cannot be used as a file name, a sound format error if the SND payload is
/// malformed, or [`Error::WriteFailed`] if the sink rejects a write.
///
/// [`Error::InvalidEntryName`]: crate::Error::InvalidEntryName
/// [`Error::WriteFailed`]: crate::Error::WriteFailed
pub fn process_entry(
    entry: &DirectoryEntry,
    data: &[u8],
    sink: &dyn OutputSink,
    options: &ExtractionOptions,
) -> Result<EntryReport> {
    validate_entry_name(&entry.name)?;
    tracing::info!("{}: size={}, flag={}", entry.name, entry.size, entry.flags);

    sink.write_file(Path::new(&entry.name), data)?;
    let mut bytes_written = data.len() as u64;

    let mut samples = Vec::new();
    if options.decode_sounds && entry.is_sound() {
        let container = SoundContainer::parse(&entry.name, data)?;

        for (index, record) in container.records.iter().enumerate() {
            let path = options
                .sound_dir
                .join(container.sample_file_name(&entry.name, index));
            let decoded = record.decode();

            tracing::info!(
                "  {}: size={}, rate={}Hz, {}",
                path.display(),
                record.data.len(),
                decoded.sample_rate,
                record.codec().as_str()
            );

            let wav = decoded.to_wav();
            sink.write_file(&path, &wav)?;
            bytes_written += wav.len() as u64;

            samples.push(SampleReport {
                path,
                data_size: record.data.len(),
                pcm_len: decoded.pcm.len(),
                sample_rate: decoded.sample_rate,
                codec: record.codec(),
            });
        }
    }

    Ok(EntryReport {
        name: entry.name.clone(),
        size: entry.size,
        flags: entry.flags,
        samples,
        bytes_written,
    })
}

/// Verify the magic and read header plus directory, reporting progress
fn scan_directory<R: Read + Seek>(
    reader: &mut ArchiveReader<R>,
    progress: ProgressCallback,
) -> Result<ArchiveDirectory> {
    progress(&ArchiveProgress::new(ArchivePhase::ReadingHeader, 0, 1));
    reader.verify_magic()?;
    let header = reader.read_header()?;

    progress(&ArchiveProgress::new(ArchivePhase::ReadingDirectory, 0, 1));
    let entries = reader.entries()?;
    tracing::debug!("Directory holds {} entries", entries.len());

    Ok(ArchiveDirectory { header, entries })
}

/// Fold one entry's outcome into the summary, or bail out
fn record_outcome(
    summary: &mut ExtractionSummary,
    entry: &DirectoryEntry,
    outcome: Result<EntryReport>,
    best_effort: bool,
) -> Result<()> {
    match outcome {
        Ok(report) => summary.entries.push(report),
        Err(e) if best_effort => {
            tracing::warn!("Skipping {}: {}", entry.name, e);
            summary.failures.push((entry.name.clone(), e.to_string()));
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemorySink;
    use crate::error::Error;
    use std::path::PathBuf;

    fn entry(name: &str, size: u32) -> DirectoryEntry {
        DirectoryEntry::new(name, size, 3, 0)
    }

    fn pcm_record(data: &[u8]) -> Vec<u8> {
        let mut out = vec![0, 0, 8, 0, 0, 0];
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(data);
        out
    }

    #[test]
    fn test_process_plain_entry() {
        let sink = MemorySink::new();
        let report =
            process_entry(&entry("A.BIN", 3), b"abc", &sink, &ExtractionOptions::new()).unwrap();

        assert_eq!(report.flags, 3);
        assert!(report.samples.is_empty());
        assert_eq!(report.bytes_written, 3);
        assert_eq!(sink.paths(), vec![PathBuf::from("A.BIN")]);
    }

    #[test]
    fn test_process_sound_entry() {
        let data = pcm_record(&[1, 2, 3]);
        let sink = MemorySink::new();
        let report = process_entry(
            &entry("TEST.SND", data.len() as u32),
            &data,
            &sink,
            &ExtractionOptions::new(),
        )
        .unwrap();

        assert_eq!(report.samples.len(), 1);
        assert_eq!(report.samples[0].path, PathBuf::from("snd/TEST.WAV"));
        assert_eq!(report.samples[0].sample_rate, 8000);
        assert_eq!(report.bytes_written, data.len() as u64 + 44 + 3);
        assert_eq!(sink.get("snd/TEST.WAV").unwrap().len(), 47);
        assert_eq!(sink.get("TEST.SND"), Some(data));
    }

    #[test]
    fn test_decode_disabled() {
        let data = pcm_record(&[1, 2, 3]);
        let sink = MemorySink::new();
        let options = ExtractionOptions::new().with_decode_sounds(false);
        let report = process_entry(&entry("TEST.SND", 13), &data, &sink, &options).unwrap();

        assert!(report.samples.is_empty());
        assert_eq!(sink.paths(), vec![PathBuf::from("TEST.SND")]);
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let sink = MemorySink::new();
        let err = process_entry(&entry("../X", 1), b"x", &sink, &ExtractionOptions::new())
            .unwrap_err();

        assert!(matches!(err, Error::InvalidEntryName(_)));
        assert!(sink.paths().is_empty());
    }

    #[test]
    fn test_record_outcome() {
        let mut summary = ExtractionSummary::default();
        let e = entry("BAD.SND", 1);
        let failure = || Err(Error::BadMagic { found: String::new() });

        record_outcome(&mut summary, &e, failure(), true).unwrap();
        assert_eq!(summary.failures.len(), 1);
        assert!(!summary.is_complete());

        assert!(record_outcome(&mut summary, &e, failure(), false).is_err());
    }
}

use std::fs;
use std::path::Path;

use beerkeg::archive::{ArchiveHeader, ArchivePhase, DirectoryEntry, MemorySink};
use beerkeg::formats::wav::encode_wav;
use beerkeg::prelude::*;
use pretty_assertions::assert_eq;
use std::sync::Mutex;
use tempfile::tempdir;

/// Lay out an archive with payloads stored after the directory, in reverse
/// table order so offsets never follow the table.
fn build_archive(files: &[(&str, u16, Vec<u8>)]) -> Vec<u8> {
    let header = ArchiveHeader {
        reserved_a: 0x1234,
        reserved_b: 0,
        item_count: files.len() as u16,
    };

    let mut offset = header.to_bytes().len() + files.len() * 24;
    let mut offsets = vec![0; files.len()];
    for (i, (_, _, data)) in files.iter().enumerate().rev() {
        offsets[i] = offset;
        offset += data.len();
    }

    let mut out = header.to_bytes().to_vec();
    for ((name, flags, data), offset) in files.iter().zip(&offsets) {
        out.extend_from_slice(
            &DirectoryEntry::new(name, data.len() as u32, *flags, *offset as u32).to_bytes(),
        );
    }
    for (_, _, data) in files.iter().rev() {
        out.extend_from_slice(data);
    }
    out
}

fn sample(rate_code: u16, flags: u16, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&7u16.to_le_bytes());
    out.extend_from_slice(&rate_code.to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(data);
    out
}

fn level_snd(samples: &[Vec<u8>]) -> Vec<u8> {
    let mut out = (samples.len() as u16).to_le_bytes().to_vec();
    for i in 0..samples.len() {
        out.extend_from_slice(&(i as u32 * 100).to_le_bytes());
    }
    for s in samples {
        out.extend_from_slice(s);
    }
    out
}

fn game_archive() -> Vec<u8> {
    build_archive(&[
        ("TITLE.PIC", 1, b"picture bytes".to_vec()),
        (
            "LEVEL1.SND",
            2,
            level_snd(&[
                sample(8, 0, &[0x80, 0x90]),
                sample(11, 1, &[0x80, 0x15, 0x0F]),
                sample(22, 0, &[]),
            ]),
        ),
        ("TEST.SND", 0, sample(8, 1, &[0x80])),
    ])
}

#[test]
fn test_extract_to_directory() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("BEER.DAT");
    fs::write(&archive, game_archive()).unwrap();
    let out = dir.path().join("beer");

    let summary = ArchiveOperations::extract(&archive, &out).unwrap();

    assert_eq!(summary.entries_extracted(), 3);
    assert_eq!(summary.samples_decoded(), 4);
    assert!(summary.is_complete());

    assert_eq!(fs::read(out.join("TITLE.PIC")).unwrap(), b"picture bytes");
    for name in ["LEVEL1_00.WAV", "LEVEL1_01.WAV", "LEVEL1_02.WAV", "TEST.WAV"] {
        assert!(out.join("snd").join(name).is_file(), "{name} missing");
    }
    assert_eq!(
        fs::read(out.join("snd/LEVEL1_01.WAV")).unwrap(),
        encode_wav(&[0x80, 0x81, 0x86, 0x86, 0x7F], 11_000)
    );
    assert_eq!(
        fs::read(out.join("snd/TEST.WAV")).unwrap(),
        encode_wav(&[0x80], 8000)
    );
}

#[test]
fn test_entry_reports_in_table_order() {
    let sink = MemorySink::new();
    let summary =
        ArchiveOperations::extract_bytes(&game_archive(), &sink, &ExtractionOptions::new())
            .unwrap();

    let names: Vec<&str> = summary.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["TITLE.PIC", "LEVEL1.SND", "TEST.SND"]);

    let level = &summary.entries[1];
    assert_eq!(level.flags, 2);
    let rates: Vec<u32> = level.samples.iter().map(|s| s.sample_rate).collect();
    assert_eq!(rates, vec![8000, 11_000, 22_000]);
    assert_eq!(level.samples[1].pcm_len, 5);
    assert_eq!(level.samples[2].pcm_len, 0);
    assert_eq!(sink.paths().len(), 7);
}

#[test]
fn test_list() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("BEER.DAT");
    fs::write(&archive, game_archive()).unwrap();

    let directory = ArchiveOperations::list(&archive).unwrap();
    assert_eq!(directory.header.reserved_a, 0x1234);
    assert_eq!(directory.entries.len(), 3);
    assert_eq!(directory.entries[0].name, "TITLE.PIC");
    assert_eq!(directory.entries[0].size, 13);
    // Payloads are stored in reverse order
    assert!(directory.entries[0].offset > directory.entries[2].offset);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("BEER.DAT");
    fs::write(&archive, game_archive()).unwrap();
    let out = dir.path().join("beer");

    let options = ExtractionOptions::new().with_dry_run(true);
    let summary =
        ArchiveOperations::extract_with_options(&archive, &out, &options, &|_| {}).unwrap();

    assert_eq!(summary.samples_decoded(), 4);
    assert!(!out.exists());
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("BEER.DAT");
    fs::write(&archive, game_archive()).unwrap();

    let sequential = dir.path().join("seq");
    let parallel = dir.path().join("par");
    ArchiveOperations::extract(&archive, &sequential).unwrap();
    let summary = ArchiveOperations::extract_with_options(
        &archive,
        &parallel,
        &ExtractionOptions::new().with_parallel(true),
        &|_| {},
    )
    .unwrap();

    assert_eq!(summary.entries[1].name, "LEVEL1.SND");
    for name in ["TITLE.PIC", "LEVEL1.SND", "snd/LEVEL1_02.WAV", "snd/TEST.WAV"] {
        assert_eq!(
            fs::read(sequential.join(name)).unwrap(),
            fs::read(parallel.join(name)).unwrap()
        );
    }
}

#[test]
fn test_progress_phases() {
    let phases = Mutex::new(Vec::new());
    let dir = tempdir().unwrap();
    let archive = dir.path().join("BEER.DAT");
    fs::write(&archive, game_archive()).unwrap();

    ArchiveOperations::extract_with_options(
        &archive,
        dir.path().join("beer"),
        &ExtractionOptions::new(),
        &|p| phases.lock().unwrap().push((p.phase, p.current)),
    )
    .unwrap();

    let phases = phases.into_inner().unwrap();
    assert_eq!(phases.first().map(|p| p.0), Some(ArchivePhase::ReadingHeader));
    assert_eq!(phases.last(), Some(&(ArchivePhase::Complete, 3)));
    let extracting = phases
        .iter()
        .filter(|p| p.0 == ArchivePhase::ExtractingEntries)
        .count();
    assert_eq!(extracting, 3);
}

#[test]
fn test_bad_magic() {
    let mut bytes = game_archive();
    bytes[0] = b'X';

    let err = ArchiveOperations::extract_bytes(&bytes, &MemorySink::new(), &ExtractionOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::BadMagic { .. }));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_missing_archive_is_io_error() {
    let dir = tempdir().unwrap();
    let err = ArchiveOperations::list(dir.path().join("NOPE.DAT")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_truncated_sample_aborts() {
    let mut broken = sample(8, 0, &[1, 2, 3, 4]);
    broken.truncate(broken.len() - 2);
    let bytes = build_archive(&[
        ("A.BIN", 0, b"a".to_vec()),
        ("BROKEN.SND", 0, broken),
        ("C.BIN", 0, b"c".to_vec()),
    ]);

    let sink = MemorySink::new();
    let err = ArchiveOperations::extract_bytes(&bytes, &sink, &ExtractionOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::TruncatedSample { .. }));
    assert!(sink.get("C.BIN").is_none());
}

#[test]
fn test_best_effort_skips_failures() {
    let bytes = build_archive(&[
        ("A.BIN", 0, b"a".to_vec()),
        ("LEVEL9.SND", 0, vec![5]),
        ("C.BIN", 0, b"c".to_vec()),
    ]);

    let sink = MemorySink::new();
    let options = ExtractionOptions::new().with_best_effort(true);
    let summary = ArchiveOperations::extract_bytes(&bytes, &sink, &options).unwrap();

    assert!(!summary.is_complete());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0, "LEVEL9.SND");
    assert_eq!(sink.get("C.BIN"), Some(b"c".to_vec()));
}

#[test]
fn test_out_of_range_entry() {
    let mut bytes = build_archive(&[("A.BIN", 0, b"abc".to_vec())]);
    bytes.truncate(bytes.len() - 1);

    let err = ArchiveOperations::extract_bytes(&bytes, &MemorySink::new(), &ExtractionOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_custom_sound_dir() {
    let sink = MemorySink::new();
    let options = ExtractionOptions::new().with_sound_dir("audio");
    ArchiveOperations::extract_bytes(&game_archive(), &sink, &options).unwrap();

    assert!(sink.get(Path::new("audio/TEST.WAV")).is_some());
    assert!(sink.get(Path::new("snd/TEST.WAV")).is_none());
}

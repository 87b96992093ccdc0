//! CLI command for archive extraction

use std::path::Path;

use crate::archive::{ArchiveOperations, ArchivePhase, EntryReport, ExtractionOptions};
use crate::cli::progress::{LOOKING_GLASS, PACKAGE, SPEAKER, WARNING, print_done, print_step, simple_bar};

pub fn execute(
    source: &Path,
    destination: &Path,
    options: &ExtractionOptions,
    progress: bool,
) -> anyhow::Result<()> {
    if progress {
        print_step(1, 2, LOOKING_GLASS, &format!("Reading {}...", source.display()));
    }
    let directory = ArchiveOperations::list(source)?;
    let total = directory.entries.len() as u64;

    let summary = if progress {
        let verb = if options.dry_run { "Checking" } else { "Extracting" };
        print_step(
            2,
            2,
            PACKAGE,
            &format!("{verb} {total} entries to {}...", destination.display()),
        );

        let pb = simple_bar(total, "");
        let summary =
            ArchiveOperations::extract_with_options(source, destination, options, &|p| {
                if p.phase == ArchivePhase::ExtractingEntries {
                    pb.set_position(p.current as u64);
                    if let Some(name) = &p.current_file {
                        pb.set_message(name.clone());
                    }
                }
            });
        pb.finish_and_clear();
        summary?
    } else {
        ArchiveOperations::extract_with_options(source, destination, options, &|_| {})?
    };

    if progress {
        for entry in &summary.entries {
            print_entry(entry);
        }
        for (name, error) in &summary.failures {
            println!("{WARNING}{name}: {error}");
        }

        let written = if options.dry_run { "would be written" } else { "written" };
        println!(
            "{SPEAKER}{} entries, {} samples, {} bytes {written}",
            summary.entries_extracted(),
            summary.samples_decoded(),
            summary.bytes_written()
        );
        print_done(summary.elapsed);
    }

    if !summary.is_complete() {
        anyhow::bail!(
            "{} of {} entries failed",
            summary.failures.len(),
            directory.entries.len()
        );
    }

    Ok(())
}

/// Print one entry and its samples in the classic unpacker's format
fn print_entry(entry: &EntryReport) {
    println!(" - {}: size={}, flag={}", entry.name, entry.size, entry.flags);
    for sample in &entry.samples {
        let name = sample
            .path
            .file_name()
            .map_or_else(|| sample.path.to_string_lossy(), |n| n.to_string_lossy());
        println!(
            "   - {name}: size={}, rate={}Hz, {}",
            sample.data_size,
            sample.sample_rate,
            sample.codec.as_str()
        );
    }
}

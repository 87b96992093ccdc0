//! BeerKeg CLI - Command-line unpacker for combiner archives

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::archive::{DEFAULT_OUTPUT_DIR, DEFAULT_SOUND_DIR, ExtractionOptions};

#[derive(Parser)]
#[command(name = "beerkeg", version)]
#[command(about = "BeerKeg: unpack BEER.DAT and decode its sounds to WAV", long_about = None)]
struct Cli {
    /// Source archive
    #[arg(default_value = "BEER.DAT")]
    archive: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Subdirectory of the output directory for decoded samples
    #[arg(long, default_value = DEFAULT_SOUND_DIR)]
    sound_dir: PathBuf,

    /// List entries without extracting
    #[arg(short, long)]
    list: bool,

    /// Parse and decode everything but write nothing
    #[arg(long, conflicts_with = "list")]
    dry_run: bool,

    /// Write raw entries only, skip SND decoding
    #[arg(long)]
    no_decode: bool,

    /// Skip entries that fail instead of stopping (exit status is still non-zero)
    #[arg(short, long)]
    keep_going: bool,

    /// Extract entries in parallel
    #[arg(long)]
    parallel: bool,

    /// Suppress per-entry output and the progress bar
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn to_extraction_options(&self) -> ExtractionOptions {
        ExtractionOptions::new()
            .with_dry_run(self.dry_run)
            .with_decode_sounds(!self.no_decode)
            .with_best_effort(self.keep_going)
            .with_parallel(self.parallel)
            .with_sound_dir(self.sound_dir.clone())
    }
}

/// Run the BeerKeg CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging (RUST_LOG overrides the default)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if cli.list {
        return commands::list::execute(&cli.archive);
    }

    commands::extract::execute(
        &cli.archive,
        &cli.output,
        &cli.to_extraction_options(),
        !cli.quiet,
    )
}

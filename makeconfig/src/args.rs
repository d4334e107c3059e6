use clap::Parser;
use std::path::PathBuf;
use watchlist_core::discovery::COREREF_PATTERN;
use watchlist_core::BatchOptions;

/// Generates the watchlist config file from the vendor reference data files.
#[derive(Parser, Debug)]
#[command(name = "makeconfig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory searched recursively for reference data files.
    #[arg(help = "Root of the reference data directory tree")]
    pub data_directory: PathBuf,

    /// JSON file mapping each source id to its instrument stems.
    #[arg(help = "Path to the source-instruments JSON file")]
    pub path_to_input_file: PathBuf,

    /// Output directory (default: current directory).
    #[arg(short, long)]
    pub write_to: Option<PathBuf>,

    /// Glob selecting the files to scan, relative to the data directory.
    #[arg(long, default_value = COREREF_PATTERN)]
    pub pattern: String,

    /// Keep only the first occurrence of each source/symbol pair.
    #[arg(long)]
    pub dedupe: bool,

    /// Number of files scanned in parallel.
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,
}

impl Cli {
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions::default()
            .with_dedupe(self.dedupe)
            .with_jobs(self.jobs)
    }
}

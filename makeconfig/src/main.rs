use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use thiserror::Error;
use watchlist_core::{
    process_all, search_files, write_config_file, FilePattern, SourceInstrumentMap,
    WatchlistError, WriteSummary,
};

pub mod args;

use args::Cli;

// Define Main CLI Errors
#[derive(Error, Debug)]
enum CliError {
    #[error("Path does not exist: {0}")]
    MissingPath(PathBuf),

    #[error("Could not determine the current directory: {0}")]
    CurrentDir(std::io::Error),

    #[error("Generator error: {0}")]
    Generator(#[from] WatchlistError),
}

fn run(cli: &Cli) -> Result<WriteSummary, CliError> {
    for path in [&cli.data_directory, &cli.path_to_input_file] {
        if !path.exists() {
            return Err(CliError::MissingPath(path.clone()));
        }
    }

    let pattern = FilePattern::parse(&cli.pattern)?;
    let reference_files = search_files(&cli.data_directory, &pattern)?;
    info!(
        "Found {} reference files matching '{}' under {}",
        reference_files.len(),
        pattern.as_str(),
        cli.data_directory.display()
    );

    let instruments = SourceInstrumentMap::load(&cli.path_to_input_file)?;
    info!(
        "Loaded instruments for {} sources: {}",
        instruments.len(),
        instruments.sources().join(", ")
    );
    if instruments.is_empty() {
        warn!(
            "{} configures no sources; any reference file found will be rejected",
            cli.path_to_input_file.display()
        );
    }
    let discovered = process_all(&reference_files, &instruments, &cli.batch_options())?;

    let write_to = match &cli.write_to {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(CliError::CurrentDir)?,
    };
    Ok(write_config_file(&write_to, &discovered)?)
}

fn main() -> Result<(), CliError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!(
        "Scanning '{}' with instruments from '{}'...",
        cli.data_directory.display(),
        cli.path_to_input_file.display()
    );

    match run(&cli) {
        Ok(summary) => {
            info!(
                "Config with {} rows written to {}",
                summary.count(),
                summary.path().display()
            );
            println!("{summary}");
            Ok(())
        }
        Err(e) => {
            error!("Config generation failed: {}", e);
            Err(e)
        }
    }
}

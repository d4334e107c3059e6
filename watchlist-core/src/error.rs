use std::path::PathBuf;
use thiserror::Error;

/// Global error type for the watchlist config generator.
#[derive(Error, Debug)]
pub enum WatchlistError {
    /// The file name does not follow `<TYPE>_<sourceId>_<date>.<ext>`.
    #[error("Malformed reference file name: {0}")]
    MalformedFileName(PathBuf),

    /// The source id derived from a file has no entry in the instruments map.
    #[error("No instruments configured for source {source_id} (file {path})")]
    UnknownSource { source_id: String, path: PathBuf },

    /// The source id is mapped to an empty instrument list.
    #[error("Instrument list for source {0} is empty")]
    NoInstruments(String),

    /// A line of a reference file is not valid UTF-8.
    #[error("Invalid UTF-8 in {path} at line {line}")]
    Decode { path: PathBuf, line: usize },

    /// A line passed the message filter but the symbol extractor found nothing.
    #[error("Pattern mismatch in {path} at line {line}: {content:?}")]
    PatternMismatch {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// Underlying IO failure on a specific path.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The instruments document could not be parsed.
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A built pattern failed to compile.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Failed to write the CSV output.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to walk the data directory.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A file search pattern is not a valid glob.
    #[error("Invalid search pattern: {0}")]
    Glob(#[from] globset::Error),
}

impl WatchlistError {
    /// Wraps an IO error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A specialized Result type for watchlist operations.
pub type Result<T> = std::result::Result<T, WatchlistError>;

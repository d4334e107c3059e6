//! Emission of the dated watchlist configuration file.

use crate::error::{Result, WatchlistError};
use crate::model::ContractMatch;
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const CONFIG_FILE_PREFIX: &str = "watchlist_config";
const HEADER: [&str; 2] = ["sourceId", "RTSsymbol"];

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    path: PathBuf,
    count: usize,
}

impl WriteSummary {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of symbols written, header excluded.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl fmt::Display for WriteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Write complete. Written {} symbols to the file.",
            self.count
        )
    }
}

/// The current date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Name of the config file for `date`, e.g. `watchlist_config_20201016.csv`.
pub fn config_file_name(date: NaiveDate) -> String {
    format!("{}_{}.csv", CONFIG_FILE_PREFIX, date.format("%Y%m%d"))
}

pub fn config_file_path(directory: &Path, date: NaiveDate) -> PathBuf {
    directory.join(config_file_name(date))
}

/// Writes today's config file into `directory`.
pub fn write_config_file(directory: &Path, pairs: &[ContractMatch]) -> Result<WriteSummary> {
    write_config_file_on(directory, today_utc(), pairs)
}

/// Writes the config file for `date` into `directory`.
///
/// The directory is created if needed. Rows go to a temporary sibling file
/// that is synced and then renamed over the target, so an existing config is
/// never left half written. The temporary file is removed if any step fails.
pub fn write_config_file_on(
    directory: &Path,
    date: NaiveDate,
    pairs: &[ContractMatch],
) -> Result<WriteSummary> {
    fs::create_dir_all(directory).map_err(|e| WatchlistError::io(directory, e))?;

    let path = config_file_path(directory, date);
    let content = render_rows(&path, pairs)?;
    let temp_path = path.with_extension("csv.tmp");

    if let Err(e) = replace_file(&temp_path, &path, &content) {
        if temp_path.exists() {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!("Could not remove {}: {}", temp_path.display(), cleanup);
            }
        }
        return Err(WatchlistError::io(&path, e));
    }

    info!("Wrote {} symbols to {}", pairs.len(), path.display());
    Ok(WriteSummary {
        path,
        count: pairs.len(),
    })
}

fn render_rows(path: &Path, pairs: &[ContractMatch]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for pair in pairs {
        writer.write_record([pair.source_id(), pair.symbol()])?;
    }
    writer
        .into_inner()
        .map_err(|e| WatchlistError::io(path, e.into_error()))
}

fn replace_file(temp_path: &Path, path: &Path, content: &[u8]) -> io::Result<()> {
    let mut temp_file = File::create(temp_path)?;
    temp_file.write_all(content)?;
    temp_file.sync_all()?;
    fs::rename(temp_path, path)
}

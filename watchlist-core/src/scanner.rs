//! Line scanning of compressed reference data files.
//!
//! Every line is decoded as UTF-8 and tested against the message level
//! pattern of a [`MatchingRule`]. Qualifying lines go through the instrument
//! level pattern, which yields the contract symbol recorded for the file's
//! source.

use crate::error::{Result, WatchlistError};
use crate::model::ContractMatch;
use crate::naming::source_id_from_path;
use crate::pattern::MatchingRule;
use bzip2::read::MultiBzDecoder;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Scans an already decompressed stream.
///
/// `origin` names the stream in errors. Lines are read up to `\n` and a
/// trailing `\r` is dropped before matching.
///
/// # Errors
///
/// * `Decode` on a line that is not valid UTF-8.
/// * `PatternMismatch` when a line passes the filter but yields no symbol.
/// * `Io` on read failure.
pub fn scan_reader<R: BufRead>(
    source_id: &str,
    mut reader: R,
    rule: &MatchingRule,
    origin: &Path,
) -> Result<Vec<ContractMatch>> {
    let mut matches = Vec::new();
    let mut buffer = Vec::new();
    let mut line_number = 0;

    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|e| WatchlistError::io(origin, e))?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let line = std::str::from_utf8(&buffer).map_err(|_| WatchlistError::Decode {
            path: origin.to_path_buf(),
            line: line_number,
        })?;
        let line = line.trim_end_matches(&['\n', '\r'][..]);

        if !rule.accepts(line) {
            continue;
        }

        let symbol = rule
            .extract(line)
            .ok_or_else(|| WatchlistError::PatternMismatch {
                path: origin.to_path_buf(),
                line: line_number,
                content: line.to_string(),
            })?;
        debug!("{}:{} -> {}", origin.display(), line_number, symbol);
        matches.push(ContractMatch::new(source_id, symbol));
    }

    Ok(matches)
}

/// Scans one bzip2 compressed reference file.
///
/// The source id recorded with each symbol is derived from the file name.
pub fn scan_file(path: &Path, rule: &MatchingRule) -> Result<Vec<ContractMatch>> {
    let source_id = source_id_from_path(path)?;
    let file = File::open(path).map_err(|e| WatchlistError::io(path, e))?;
    let reader = BufReader::new(MultiBzDecoder::new(file));
    scan_reader(&source_id, reader, rule, path)
}

/// Scans a file with raw filter and extractor patterns.
pub fn retrieve_source_symbol_pairs(
    path: &Path,
    message_level_pattern: &str,
    instrument_level_pattern: &str,
) -> Result<Vec<ContractMatch>> {
    let source_id = source_id_from_path(path)?;
    let rule =
        MatchingRule::from_patterns(&source_id, message_level_pattern, instrument_level_pattern)?;
    scan_file(path, &rule)
}

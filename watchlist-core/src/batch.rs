//! Batch processing of reference files.
//!
//! Files are processed independently. Results are concatenated in file order
//! and, within a file, in line order. The first failing file aborts the batch.

use crate::error::Result;
use crate::instruments::SourceInstrumentMap;
use crate::model::ContractMatch;
use crate::naming::ReferenceFileName;
use crate::pattern::MatchingRule;
use crate::scanner::scan_file;
use log::{debug, info};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::thread;

/// Options controlling a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Keep only the first occurrence of each `(source, symbol)` pair.
    pub dedupe: bool,
    /// Number of worker threads. `0` and `1` both mean sequential.
    pub jobs: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            dedupe: false,
            jobs: 1,
        }
    }
}

impl BatchOptions {
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }
}

/// Collects the configured contracts from a single reference file.
///
/// # Errors
///
/// * `MalformedFileName` if no source id can be derived from the path.
/// * `UnknownSource` if the map has no entry for that source id.
/// * Any scanning error of [`scan_file`].
pub fn process_file(path: &Path, map: &SourceInstrumentMap) -> Result<Vec<ContractMatch>> {
    let name = ReferenceFileName::parse(path)?;
    let source_id = name.source_id();
    debug!(
        "Processing {} file of source {} dated {}",
        name.file_type(),
        source_id,
        name.date().unwrap_or("unknown")
    );

    let instruments = map.instruments_for(source_id, path)?;
    let rule = MatchingRule::build(source_id, instruments)?;
    debug!(
        "Rule for source {}: filter {} extractor {}",
        rule.source_id(),
        rule.filter_source(),
        rule.extractor_source()
    );

    let matches = scan_file(path, &rule)?;
    info!(
        "Found {} contracts for source {} in {}",
        matches.len(),
        source_id,
        path.display()
    );
    Ok(matches)
}

/// Collects the configured contracts from every file, in order.
pub fn process_all(
    paths: &[PathBuf],
    map: &SourceInstrumentMap,
    options: &BatchOptions,
) -> Result<Vec<ContractMatch>> {
    let per_file = if options.jobs > 1 && paths.len() > 1 {
        process_parallel(paths, map, options.jobs)?
    } else {
        paths
            .iter()
            .map(|path| process_file(path, map))
            .collect::<Result<Vec<_>>>()?
    };

    let discovered: Vec<ContractMatch> = per_file.into_iter().flatten().collect();
    if options.dedupe {
        Ok(dedupe(discovered))
    } else {
        Ok(discovered)
    }
}

/// Splits the files into contiguous chunks, one per worker.
///
/// Each worker returns its chunk's results in order, and chunks are joined in
/// spawn order, so the merged output matches a sequential run.
fn process_parallel(
    paths: &[PathBuf],
    map: &SourceInstrumentMap,
    jobs: usize,
) -> Result<Vec<Vec<ContractMatch>>> {
    let chunk_size = paths.len().div_ceil(jobs);
    debug!(
        "Processing {} files on {} workers",
        paths.len(),
        paths.len().div_ceil(chunk_size)
    );

    let chunk_results: Vec<Result<Vec<Vec<ContractMatch>>>> = thread::scope(|scope| {
        let handles: Vec<_> = paths
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|path| process_file(path, map))
                        .collect::<Result<Vec<_>>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut per_file = Vec::with_capacity(paths.len());
    for chunk in chunk_results {
        per_file.extend(chunk?);
    }
    Ok(per_file)
}

/// Drops repeated pairs, keeping the order of first appearance.
pub fn dedupe(matches: Vec<ContractMatch>) -> Vec<ContractMatch> {
    let mut seen = HashSet::with_capacity(matches.len());
    matches
        .into_iter()
        .filter(|m| seen.insert(m.clone()))
        .collect()
}

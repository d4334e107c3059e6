//! Parsing of vendor reference file names.
//!
//! The vendor names every file `<TYPE>_<sourceId>_<YYYYMMDD>.<ext>.bz2`
//! (e.g. `COREREF_207_20201023.txt.bz2`). The second underscore-delimited
//! component is always the source id.

use crate::error::{Result, WatchlistError};
use std::path::Path;

/// The tokens embedded in a reference file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceFileName {
    file_type: String,
    source_id: String,
    date: Option<String>,
}

impl ReferenceFileName {
    /// Parses the file name component of `path`.
    ///
    /// Everything after the first `.` is treated as extension and ignored.
    ///
    /// # Errors
    ///
    /// * `MalformedFileName` if the name has fewer than two `_` components,
    ///   an empty source token, or is not valid UTF-8.
    pub fn parse(path: &Path) -> Result<Self> {
        let malformed = || WatchlistError::MalformedFileName(path.to_path_buf());

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(malformed)?;
        let stem = file_name.split('.').next().unwrap_or_default();

        let mut components = stem.split('_');
        let file_type = components.next().unwrap_or_default();
        let source_id = components.next().ok_or_else(malformed)?;
        if source_id.is_empty() {
            return Err(malformed());
        }
        let date = components.next().filter(|d| !d.is_empty());

        Ok(Self {
            file_type: file_type.to_string(),
            source_id: source_id.to_string(),
            date: date.map(str::to_string),
        })
    }

    /// The record type token (e.g. `COREREF`).
    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// The date token, when the name carries one (e.g. `20201023`).
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// Returns the source id embedded in a reference file path.
pub fn source_id_from_path(path: &Path) -> Result<String> {
    ReferenceFileName::parse(path).map(|name| name.source_id)
}

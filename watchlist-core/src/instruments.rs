use crate::error::{Result, WatchlistError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// The instruments of interest for each source id.
///
/// Loaded once from a JSON document of the form
/// `{"207": ["F:FESX", "F:FDAX"], "673": ["F2:ES"]}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SourceInstrumentMap {
    sources: HashMap<String, Vec<String>>,
}

impl SourceInstrumentMap {
    /// Loads the map from a JSON file.
    ///
    /// # Errors
    ///
    /// * `Io` if the file cannot be opened.
    /// * `Json` if the content is not a string to string-list mapping.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| WatchlistError::io(path, e))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| WatchlistError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_pairs<I, K, V, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
            .collect();
        Self { sources }
    }

    /// Returns the instrument stems configured for `source_id`.
    ///
    /// `path` is only used to give context to the error.
    ///
    /// # Errors
    ///
    /// * `UnknownSource` if the map has no entry for the source.
    pub fn instruments_for(&self, source_id: &str, path: &Path) -> Result<&[String]> {
        self.sources
            .get(source_id)
            .map(Vec::as_slice)
            .ok_or_else(|| WatchlistError::UnknownSource {
                source_id: source_id.to_string(),
                path: PathBuf::from(path),
            })
    }

    /// Source ids in lexical order.
    pub fn sources(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

//! Data types shared by the scanner and the emitter.

/// A contract discovered in a reference file, tagged with its source id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractMatch {
    source_id: String,
    symbol: String,
}

impl ContractMatch {
    pub fn new(source_id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            symbol: symbol.into(),
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// The full contract symbol (e.g. `F:FESX\H21`).
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

//! Construction of the per-source matching rules.
//!
//! Futures contracts follow the vendor convention `<stem>\<month_code><yy>`
//! (e.g. `F:FESX\H21` for the EURO STOXX 50 future, March 2021). Two patterns
//! are built for every source:
//!
//! - the *message level* pattern selects `DC` records of that source whose
//!   symbol field starts with one of the configured stems;
//! - the *instrument level* pattern pulls the complete contract symbol out of
//!   a line that passed the first one.

use crate::error::{Result, WatchlistError};
use regex::Regex;

/// Record type carrying the contract definitions.
pub const DC_MESSAGE_TYPE: &str = "DC";

/// Builds the pattern matching every contract of a single instrument stem.
///
/// The backslash separating stem and expiry is matched literally.
pub fn instrument_regex(instrument_symbol: &str) -> String {
    format!(r"{}\\[A-Z][0-9]{{2}}", regex::escape(instrument_symbol))
}

/// Builds a pattern matching the contracts of any stem in the list.
pub fn instrument_level_pattern<S: AsRef<str>>(instrument_symbols: &[S]) -> String {
    let alternatives: Vec<String> = instrument_symbols
        .iter()
        .map(|symbol| instrument_regex(symbol.as_ref()))
        .collect();
    format!("({})", alternatives.join("|"))
}

/// Builds the pattern selecting the `DC` messages of `source_id` that refer to
/// one of the listed stems.
pub fn message_level_pattern<S: AsRef<str>>(source_id: &str, instrument_symbols: &[S]) -> String {
    format!(
        r"^{}\|{}\|{}",
        DC_MESSAGE_TYPE,
        regex::escape(source_id),
        instrument_level_pattern(instrument_symbols)
    )
}

/// Combines several raw patterns into a single compiled alternation.
pub fn combine_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Regex> {
    let joined: Vec<&str> = patterns.iter().map(AsRef::as_ref).collect();
    Ok(Regex::new(&joined.join("|"))?)
}

/// The compiled filter/extractor pair for one source.
#[derive(Debug, Clone)]
pub struct MatchingRule {
    source_id: String,
    filter: Regex,
    extractor: Regex,
}

impl MatchingRule {
    /// Compiles the rule for `source_id` and its instrument stems.
    ///
    /// # Errors
    ///
    /// * `NoInstruments` if `instrument_symbols` is empty. An empty
    ///   alternation would accept every `DC` line of the source.
    /// * `Regex` if compilation fails.
    pub fn build<S: AsRef<str>>(source_id: &str, instrument_symbols: &[S]) -> Result<Self> {
        if instrument_symbols.is_empty() {
            return Err(WatchlistError::NoInstruments(source_id.to_string()));
        }
        Self::from_patterns(
            source_id,
            &message_level_pattern(source_id, instrument_symbols),
            &instrument_level_pattern(instrument_symbols),
        )
    }

    /// Compiles a rule from already-built pattern text.
    pub fn from_patterns(source_id: &str, filter: &str, extractor: &str) -> Result<Self> {
        Ok(Self {
            source_id: source_id.to_string(),
            filter: Regex::new(filter)?,
            extractor: Regex::new(extractor)?,
        })
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn filter_source(&self) -> &str {
        self.filter.as_str()
    }

    pub fn extractor_source(&self) -> &str {
        self.extractor.as_str()
    }

    /// Returns `true` if the line is a qualifying message.
    pub fn accepts(&self, line: &str) -> bool {
        self.filter.is_match(line)
    }

    /// Returns the first contract symbol found in the line.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.extractor.find(line).map(|m| m.as_str())
    }
}

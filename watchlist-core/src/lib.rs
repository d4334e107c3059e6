//! # Watchlist Core Library
//!
//! Builds the watchlist subscription config from the vendor's daily
//! reference data files.
//!
//! ## Modules
//! - `naming`: Source id extraction from `<TYPE>_<sourceId>_<date>` file names.
//! - `pattern`: Message level and instrument level matching rules.
//! - `scanner`: Line scanning of bzip2 compressed reference files.
//! - `batch`: Ordered processing of a whole set of files.
//! - `instruments`: The source to instrument stems map.
//! - `discovery`: Recursive search for reference files.
//! - `emitter`: The dated `watchlist_config_<YYYYMMDD>.csv` writer.

pub mod batch;
pub mod discovery;
pub mod emitter;
pub mod error;
pub mod instruments;
pub mod model;
pub mod naming;
pub mod pattern;
pub mod scanner;

pub use batch::{process_all, process_file, BatchOptions};
pub use discovery::{find_all_coreref_files, search_files, FilePattern};
pub use emitter::{write_config_file, WriteSummary};
pub use error::{Result, WatchlistError};
pub use instruments::SourceInstrumentMap;
pub use model::ContractMatch;
pub use pattern::MatchingRule;

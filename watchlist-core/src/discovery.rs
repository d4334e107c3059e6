//! Discovery of reference data files on disk.

use crate::error::Result;
use globset::{GlobBuilder, GlobMatcher};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default pattern for core reference data files, at any depth.
pub const COREREF_PATTERN: &str = "**/COREREF*.txt.bz2";

/// A glob matched against paths relative to the searched directory.
///
/// `*` and `?` never cross a `/`; `**/` spans any number of directories, so
/// `*.py` only selects direct children while `**/*.py` selects every level.
#[derive(Debug, Clone)]
pub struct FilePattern {
    matcher: GlobMatcher,
}

impl FilePattern {
    /// Compiles a glob such as `**/COREREF*.txt.bz2` or `*/CORE/*.bz2`.
    pub fn parse(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    pub fn as_str(&self) -> &str {
        self.matcher.glob().glob()
    }

    /// Returns `true` if the relative path matches the pattern.
    pub fn matches(&self, relative_path: impl AsRef<Path>) -> bool {
        self.matcher.is_match(relative_path)
    }
}

/// Returns all files under `directory` whose path relative to it matches
/// `pattern`.
///
/// Entries are visited in file name order, so results come out sorted by
/// path.
pub fn search_files(directory: &Path, pattern: &FilePattern) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(directory).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matched = entry
            .path()
            .strip_prefix(directory)
            .is_ok_and(|relative| pattern.matches(relative));
        if matched {
            debug!("Discovered {}", entry.path().display());
            found.push(entry.into_path());
        }
    }

    Ok(found)
}

/// Finds every `COREREF*.txt.bz2` file under `directory`, at any depth.
pub fn find_all_coreref_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let files = search_files(directory, &FilePattern::parse(COREREF_PATTERN)?)?;
    if files.is_empty() {
        warn!("No reference files found under {}", directory.display());
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WatchlistError;
    use std::fs;

    const LAYOUT: [(&str, &str); 3] = [
        ("CORE", "COREREF"),
        ("CROSS", "CROSSREF"),
        ("WATCHLIST", "WATCHLIST"),
    ];

    fn mock_data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for source in ["207", "367", "673"] {
            for (folder, kind) in LAYOUT {
                let folder = dir
                    .path()
                    .join("2020/10/16")
                    .join(format!("S{source}"))
                    .join(folder);
                fs::create_dir_all(&folder).unwrap();
                let name = format!("{kind}_{source}_20201016.txt.bz2");
                fs::write(folder.join(name), b"").unwrap();
            }
        }
        fs::write(dir.path().join("README.txt"), b"").unwrap();
        dir
    }

    fn search(dir: &Path, pattern: &str) -> Vec<PathBuf> {
        search_files(dir, &FilePattern::parse(pattern).unwrap()).unwrap()
    }

    fn core_files(dir: &Path) -> Vec<PathBuf> {
        ["207", "367", "673"]
            .iter()
            .map(|s| {
                dir.join("2020/10/16")
                    .join(format!("S{s}"))
                    .join("CORE")
                    .join(format!("COREREF_{s}_20201016.txt.bz2"))
            })
            .collect()
    }

    #[test]
    fn test_pattern_matching() {
        let pattern = FilePattern::parse(COREREF_PATTERN).unwrap();
        assert_eq!(pattern.as_str(), "**/COREREF*.txt.bz2");
        assert!(pattern.matches("COREREF_207_20201016.txt.bz2"));
        assert!(pattern.matches("2020/10/16/S207/CORE/COREREF_207_20201016.txt.bz2"));
        assert!(!pattern.matches("S207/CROSS/CROSSREF_207_20201016.txt.bz2"));
        assert!(!pattern.matches("S207/CORE/COREREF_207_20201016.txt"));

        let shallow = FilePattern::parse("*.txt.bz2").unwrap();
        assert!(shallow.matches("x.txt.bz2"));
        assert!(!shallow.matches("S207/x.txt.bz2"));

        assert!(matches!(
            FilePattern::parse("COREREF[.txt.bz2"),
            Err(WatchlistError::Glob(_))
        ));
    }

    #[test]
    fn test_find_all_coreref_files() {
        let dir = mock_data_dir();
        let found = find_all_coreref_files(dir.path()).unwrap();
        assert_eq!(found, core_files(dir.path()));
    }

    #[test]
    fn test_search_all_compressed_files() {
        let dir = mock_data_dir();
        let found = search(dir.path(), "**/*.txt.bz2");
        assert_eq!(found.len(), 9);
        assert!(found.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_question_mark_and_several_wildcards() {
        let dir = mock_data_dir();
        assert_eq!(search(dir.path(), "**/CORE?EF*.txt.bz2"), core_files(dir.path()));
        assert_eq!(
            search(dir.path(), "**/COREREF_*_2020*.txt.bz2"),
            core_files(dir.path())
        );
        assert_eq!(search(dir.path(), "**/*_2019*.txt.bz2"), Vec::<PathBuf>::new());
    }

    #[test]
    fn test_wildcards_stay_within_one_directory() {
        let dir = mock_data_dir();

        let cores = search(dir.path(), "*/*/*/*/CORE/*.txt.bz2");
        assert_eq!(cores, core_files(dir.path()));

        let s207 = search(dir.path(), "2020/10/16/S207/*/*.txt.bz2");
        assert_eq!(s207.len(), 3);
        assert!(s207.iter().all(|p| p.to_string_lossy().contains("S207")));

        assert!(search(dir.path(), "*.txt.bz2").is_empty());
        assert!(search(dir.path(), "*/*.txt.bz2").is_empty());
    }

    #[test]
    fn test_search_in_leaf_directory() {
        let dir = mock_data_dir();
        let cross = dir.path().join("2020/10/16/S207/CROSS");
        assert_eq!(
            search(&cross, "CROSSREF*.txt.bz2"),
            vec![cross.join("CROSSREF_207_20201016.txt.bz2")]
        );
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            find_all_coreref_files(&dir.path().join("missing")),
            Err(WatchlistError::Walk(_))
        ));
    }
}

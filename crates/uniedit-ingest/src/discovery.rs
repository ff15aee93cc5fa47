//! Candidate data-file discovery.
//!
//! Scans conventional folders for dataset (`.csv`) and alias (`.txt`)
//! files so `load`/`dump` can run without explicit paths and the prompt
//! can offer file-name completions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Folders scanned when no roots are given.
pub const DEFAULT_SCAN_FOLDERS: [&str; 2] = ["university-information", "questionnaires"];

/// Extension of dataset files.
pub const DATASET_EXTENSION: &str = "csv";

/// Extension of alias files.
pub const ALIAS_EXTENSION: &str = "txt";

/// Conventional dataset file name resolved by a zero-argument `load`.
pub const DEFAULT_DATASET_NAME: &str = "results_desensitized.csv";

/// Conventional alias file name resolved by a zero-argument `load`.
pub const DEFAULT_ALIAS_NAME: &str = "alias.txt";

/// Recursively maps file base-name to resolved path for every `.csv` and
/// `.txt` file under the given roots (or the default folders when none are
/// given). On a base-name collision the last-discovered file wins.
///
/// Missing or non-directory roots are skipped silently; an empty map is a
/// valid result.
#[must_use]
pub fn scan_folders(roots: &[PathBuf]) -> BTreeMap<String, PathBuf> {
    let defaults: Vec<PathBuf> = DEFAULT_SCAN_FOLDERS.iter().map(PathBuf::from).collect();
    let roots = if roots.is_empty() { &defaults } else { roots };

    let mut found = BTreeMap::new();
    for root in roots {
        if root.is_dir() {
            walk(root, &mut found);
        }
    }
    debug!(candidates = found.len(), "scanned data folders");
    found
}

fn walk(dir: &Path, found: &mut BTreeMap<String, PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    // Sort for a deterministic last-wins outcome.
    paths.sort();
    for path in paths {
        if path.is_dir() {
            walk(&path, found);
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ext.eq_ignore_ascii_case(DATASET_EXTENSION) || ext.eq_ignore_ascii_case(ALIAS_EXTENSION)
            });
        if !matches {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            found.insert(name.to_string(), path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_collects_csv_and_txt() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("results.csv"), "x").unwrap();
        std::fs::write(dir.path().join("alias.txt"), "x").unwrap();
        std::fs::write(dir.path().join("notes.md"), "x").unwrap();
        std::fs::write(dir.path().join("nested/extra.csv"), "x").unwrap();

        let found = scan_folders(&[dir.path().to_path_buf()]);
        assert_eq!(found.len(), 3);
        assert!(found.contains_key("results.csv"));
        assert!(found.contains_key("alias.txt"));
        assert!(found.contains_key("extra.csv"));
        assert!(!found.contains_key("notes.md"));
    }

    #[test]
    fn test_last_root_wins_on_name_collision() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::write(first.path().join("alias.txt"), "first").unwrap();
        std::fs::write(second.path().join("alias.txt"), "second").unwrap();

        let found = scan_folders(&[first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(found["alias.txt"], second.path().join("alias.txt"));
    }

    #[test]
    fn test_missing_roots_are_skipped() {
        let found = scan_folders(&[PathBuf::from("/definitely/not/here")]);
        assert!(found.is_empty());
    }
}

//! Test file discovery

use crate::error::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into
const IGNORED_DIRS: &[&str] = &["node_modules", "bower_components", "coverage", "dist"];

/// Expand `paths` into the list of files to lint.
///
/// Files named explicitly are always kept; directories are walked and only
/// files whose name matches `pattern` are kept. Results are sorted and
/// deduplicated.
pub fn discover_test_files(paths: &[PathBuf], pattern: &Regex) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            collect_from_directory(path, pattern, &mut files);
        } else {
            return Err(Error::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn collect_from_directory(dir: &Path, pattern: &Regex, files: &mut Vec<PathBuf>) {
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry));

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .map(|name| pattern.is_match(name))
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }
}

fn is_ignored(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || IGNORED_DIRS.contains(&name))
        .unwrap_or(false)
}

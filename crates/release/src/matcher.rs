//! Glob expansion of the `files` input.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A local file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    /// Path as produced by the glob expansion
    pub path: PathBuf,
    /// Asset name: the last path segment
    pub name: String,
}

impl MatchedFile {
    /// Creates a matched file, deriving its display name from the path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

/// Last segment of `path`, or the whole path when it has none.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Expands every pattern, in order, into the files it matches.
///
/// Results are concatenated in pattern order and kept in the order the glob
/// walk yields them. A matched directory stands for every file below it, in
/// file name order. Within one pattern each file is listed once; files
/// matched by several patterns appear several times.
///
/// # Errors
///
/// Returns [`Error::Validation`] when a pattern is not valid glob syntax.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<MatchedFile>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let entries = glob::glob(pattern).map_err(|e| {
            Error::validation(
                format!("Invalid file pattern '{pattern}': {e}"),
                "Check the glob syntax of the files input",
            )
        })?;

        let mut seen = HashSet::new();
        let mut matched = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_dir() => {
                    debug!(path = %path.display(), "Expanding matched directory");
                    matched.extend(descendant_files(&path));
                }
                Ok(path) => matched.push(path),
                Err(e) => debug!(pattern = %pattern, error = %e, "Skipping unreadable match"),
            }
        }
        matched.retain(|path| seen.insert(path.clone()));

        debug!(pattern = %pattern, matched = matched.len(), "Expanded file pattern");
        files.extend(matched.into_iter().map(MatchedFile::new));
    }

    if files.is_empty() {
        warn!("No files matched the provided patterns");
    }

    Ok(files)
}

/// Every non-directory entry below `dir`, depth first, siblings by name.
fn descendant_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if !entry.file_type().is_dir() => Some(entry.into_path()),
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "Skipping unreadable entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, name.as_bytes()).unwrap();
        path
    }

    fn pattern(dir: &Path, glob: &str) -> String {
        format!("{}/{glob}", dir.display())
    }

    #[test]
    fn test_display_name_uses_last_segment() {
        assert_eq!(
            display_name(Path::new("dist/app-linux.tar.gz")),
            "app-linux.tar.gz"
        );
        assert_eq!(display_name(Path::new("app.zip")), "app.zip");
    }

    #[test]
    fn test_display_name_falls_back_to_full_path() {
        assert_eq!(display_name(Path::new("..")), "..");
        assert_eq!(display_name(Path::new("/")), "/");
    }

    #[test]
    fn test_expand_keeps_pattern_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b.zip");
        touch(tmp.path(), "a.tar.gz");

        let files = expand_patterns(&[
            pattern(tmp.path(), "*.zip"),
            pattern(tmp.path(), "*.tar.gz"),
        ])
        .unwrap();

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.zip", "a.tar.gz"]);
    }

    #[test]
    fn test_expand_does_not_deduplicate() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "app.tar.gz");

        let files = expand_patterns(&[
            pattern(tmp.path(), "*.tar.gz"),
            pattern(tmp.path(), "app.*"),
        ])
        .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0], files[1]);
    }

    #[test]
    fn test_expand_empty_directory_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "dist/app.tar.gz");
        fs::create_dir_all(tmp.path().join("dist/nested")).unwrap();

        let files = expand_patterns(&[pattern(tmp.path(), "dist/*")]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "app.tar.gz");
    }

    #[test]
    fn test_expand_directory_match_includes_descendants() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "dist/app.tar.gz");
        touch(tmp.path(), "dist/checksums/app.sha256");
        touch(tmp.path(), "dist/app.zip");

        let files = expand_patterns(&[tmp.path().join("dist").display().to_string()]).unwrap();

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["app.tar.gz", "app.zip", "app.sha256"]);
    }

    #[test]
    fn test_expand_lists_each_file_once_per_pattern() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "dist/app.tar.gz");

        // Matches both `dist` and `dist/app.tar.gz`.
        let files = expand_patterns(&[pattern(tmp.path(), "**/*")]).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "app.tar.gz");
    }

    #[test]
    fn test_expand_no_matches_is_empty() {
        let tmp = TempDir::new().unwrap();
        let files = expand_patterns(&[pattern(tmp.path(), "*.nothing")]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_expand_invalid_pattern() {
        let err = expand_patterns(&["dist/[".to_string()]).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("dist/["));
    }
}

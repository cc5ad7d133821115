//! File-list resolution for test runs
//!
//! Expands an ordered mix of files, directories, glob patterns, and negated
//! glob patterns into a deduplicated list of absolute paths. With no input,
//! falls back to scanning the conventional `test`/`tests` directories.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tokio::fs;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::casing::actual_casing;
use super::error::{FileListError, Result};
use crate::util::normalize_path;

/// Directories scanned when no explicit file list is given.
pub const DEFAULT_SCAN_DIRS: &[&str] = &["test", "tests"];

const DEFAULT_SCRIPT_EXTENSION: &str = "rs";

/// Resolves file-list entries against a base directory.
///
/// Entry semantics, in input order:
/// - `!pattern` removes previously matched files instead of adding any
/// - an entry containing glob metacharacters is expanded against the
///   filesystem; zero matches is not an error
/// - an existing directory is expanded recursively to its contained files
/// - an existing file is included directly
/// - anything else is a [`FileListError::NotFound`]
#[derive(Debug, Clone)]
pub struct FileListResolver {
    base_dir: PathBuf,
    script_extension: String,
}

impl FileListResolver {
    /// `base_dir` anchors relative entries and the default-directory scan;
    /// it should be an absolute path.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            script_extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
        }
    }

    /// Extension (without the dot) used to pick script files during the
    /// default-directory scan.
    pub fn with_script_extension(mut self, extension: impl Into<String>) -> Self {
        self.script_extension = extension.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves `entries` to absolute file paths, deduplicated and in
    /// stable input order. `None` or an empty slice triggers the
    /// conventional-directory scan.
    pub async fn resolve(&self, entries: Option<&[String]>) -> Result<Vec<PathBuf>> {
        match entries {
            Some(entries) if !entries.is_empty() => self.resolve_entries(entries).await,
            _ => self.scan_default_dirs().await,
        }
    }

    async fn resolve_entries(&self, entries: &[String]) -> Result<Vec<PathBuf>> {
        let mut resolved: Vec<PathBuf> = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for entry in entries {
            if let Some(pattern) = entry.strip_prefix('!') {
                self.remove_matches(pattern, &mut resolved, &mut seen)?;
                continue;
            }

            if is_glob(entry) {
                self.expand_glob(entry, &mut resolved, &mut seen)?;
                continue;
            }

            let absolute = normalize_path(&self.base_dir.join(entry));
            match fs::metadata(&absolute).await {
                Ok(meta) if meta.is_dir() => {
                    expand_directory(&actual_casing(&absolute), &mut resolved, &mut seen);
                }
                Ok(_) => {
                    add(actual_casing(&absolute), &mut resolved, &mut seen);
                }
                Err(source) if source.kind() == ErrorKind::NotFound => {
                    return Err(FileListError::NotFound {
                        path: entry.clone(),
                    });
                }
                Err(source) => return Err(source.into()),
            }
        }

        Ok(resolved)
    }

    /// Non-recursive scan of the conventional test directories for script
    /// files. Missing directories are skipped.
    async fn scan_default_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut resolved = Vec::new();
        let mut seen = HashSet::new();

        for name in DEFAULT_SCAN_DIRS {
            let dir = self.base_dir.join(name);
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(source) if source.kind() == ErrorKind::NotFound => {
                    debug!(dir = %dir.display(), "default scan directory not present");
                    continue;
                }
                Err(source) => return Err(source.into()),
            };

            while let Some(entry) = entries.next_entry().await? {
                let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
                let path = entry.path();
                if is_file
                    && path.extension().and_then(OsStr::to_str)
                        == Some(self.script_extension.as_str())
                {
                    add(normalize_path(&path), &mut resolved, &mut seen);
                }
            }
        }

        Ok(resolved)
    }

    fn expand_glob(
        &self,
        pattern: &str,
        resolved: &mut Vec<PathBuf>,
        seen: &mut HashSet<PathBuf>,
    ) -> Result<()> {
        let absolute = self.absolute_pattern(pattern);
        let matches = glob::glob(&absolute).map_err(|source| FileListError::Pattern {
            pattern: absolute.clone(),
            message: source.msg.to_string(),
        })?;

        for item in matches {
            match item {
                Ok(path) if path.is_file() => add(path, resolved, seen),
                Ok(_) => {}
                Err(source) => {
                    warn!(pattern = %absolute, %source, "skipping unreadable glob match");
                }
            }
        }
        Ok(())
    }

    fn remove_matches(
        &self,
        pattern: &str,
        resolved: &mut Vec<PathBuf>,
        seen: &mut HashSet<PathBuf>,
    ) -> Result<()> {
        let absolute = self.absolute_pattern(pattern);
        let matcher = Pattern::new(&absolute).map_err(|source| FileListError::Pattern {
            pattern: absolute.clone(),
            message: source.msg.to_string(),
        })?;
        // Match with the same separator semantics as glob's directory
        // iteration: a single `*` stays within one path component, only
        // `**` descends.
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::default()
        };

        resolved.retain(|path| {
            let excluded = matcher.matches_path_with(path, options);
            if excluded {
                seen.remove(path);
            }
            !excluded
        });
        Ok(())
    }

    fn absolute_pattern(&self, pattern: &str) -> String {
        normalize_path(&self.base_dir.join(pattern))
            .to_string_lossy()
            .into_owned()
    }
}

fn expand_directory(dir: &Path, resolved: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>) {
    for entry in WalkDir::new(dir) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                add(entry.into_path(), resolved, seen);
            }
            Ok(_) => {}
            Err(source) => {
                warn!(dir = %dir.display(), %source, "skipping unreadable directory entry");
            }
        }
    }
}

fn add(path: PathBuf, resolved: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>) {
    if seen.insert(path.clone()) {
        resolved.push(path);
    }
}

fn is_glob(entry: &str) -> bool {
    entry.chars().any(|c| matches!(c, '*' | '?' | '['))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_detection() {
        assert!(is_glob("src/**/*.rs"));
        assert!(is_glob("file?.txt"));
        assert!(is_glob("file[0-9].txt"));
        assert!(!is_glob("src/plain/file.rs"));
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_not_found() {
        let temp = tempfile::TempDir::new().unwrap();
        let resolver = FileListResolver::new(temp.path());

        let result = resolver
            .resolve(Some(&["does-not-exist.rs".to_string()]))
            .await;
        assert!(matches!(
            result,
            Err(FileListError::NotFound { path }) if path == "does-not-exist.rs"
        ));
    }

    #[tokio::test]
    async fn test_glob_with_no_matches_is_empty_not_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let resolver = FileListResolver::new(temp.path());

        let resolved = resolver
            .resolve(Some(&["nothing/**/*.zzz".to_string()]))
            .await
            .unwrap();
        assert!(resolved.is_empty());
    }
}

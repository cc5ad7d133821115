//! On-disk casing correction for user-supplied paths
//!
//! On case-insensitive filesystems the same file is reachable through
//! differently cased spellings. Resolving every explicit path to the casing
//! the filesystem actually stores keeps the resolver's dedup keyed on one
//! canonical string per physical file.

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

/// Rewrites each component of `path` to the name stored on disk.
///
/// Components that cannot be listed (missing parent, permission error) are
/// kept as given. Exact-case matches always win over case-insensitive ones,
/// so on a case-sensitive filesystem this is the identity for existing paths.
pub fn actual_casing(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => match on_disk_name(&result, name) {
                Some(stored) => result.push(stored),
                None => result.push(name),
            },
            other => result.push(other.as_os_str()),
        }
    }
    result
}

fn on_disk_name(dir: &Path, name: &OsStr) -> Option<OsString> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut fallback = None;
    for entry in entries.flatten() {
        let entry_name = entry.file_name();
        if entry_name.as_os_str() == name {
            return Some(entry_name);
        }
        if entry_name.eq_ignore_ascii_case(name) {
            fallback = Some(entry_name);
        }
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_path_is_unchanged() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Nested").join("File.txt");
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, b"x").unwrap();

        assert_eq!(actual_casing(&file), file);
    }

    #[test]
    fn test_missing_path_is_kept_as_given() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("no").join("such").join("file");
        assert_eq!(actual_casing(&missing), missing);
    }

    #[cfg(any(windows, target_os = "macos"))]
    #[test]
    fn test_miscased_component_is_corrected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("CaseDir").join("CaseFile.txt");
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, b"x").unwrap();

        let miscased = temp.path().join("casedir").join("casefile.TXT");
        assert_eq!(actual_casing(&miscased), file);
    }
}

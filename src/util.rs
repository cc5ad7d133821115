//! Small path and string helpers shared across the crate

use std::path::{Component, Path, PathBuf};

/// Lexically cleans a path: drops `.` components and resolves `..` against
/// preceding normal components. Does not touch the filesystem, so symlinks
/// are not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => result.push(Component::ParentDir.as_os_str()),
            },
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Escapes a browser user-agent string for use as a file name, replacing
/// runs of filesystem-unsafe characters with a single underscore.
pub fn escape_user_agent(agent: &str) -> String {
    let mut escaped = String::with_capacity(agent.len());
    let mut last_replaced = false;
    for ch in agent.trim().chars() {
        let replace =
            ch.is_control() || matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
        if replace {
            if !last_replaced {
                escaped.push('_');
            }
            last_replaced = true;
        } else {
            escaped.push(ch);
            last_replaced = false;
        }
    }
    escaped
}

/// Longest shared ancestor of the given paths, by whole components.
/// Returns `None` for an empty input or when the paths share no prefix.
pub fn common_path(paths: &[PathBuf]) -> Option<PathBuf> {
    let (first, rest) = paths.split_first()?;
    let mut shared: Vec<Component<'_>> = first.components().collect();

    for path in rest {
        let matched = shared
            .iter()
            .zip(path.components())
            .take_while(|(kept, next)| **kept == *next)
            .count();
        shared.truncate(matched);
        if shared.is_empty() {
            return None;
        }
    }

    Some(shared.iter().map(|c| c.as_os_str()).collect())
}

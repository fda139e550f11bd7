//! Lexical path helpers
//!
//! Paths reported to dependency trackers must be stable names for the file,
//! so `.` and `..` are folded without touching the file system. Symlinks are
//! left alone (unlike `canonicalize`, this works for files that don't exist).

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::RefError;

/// Make `path` absolute against the current directory and normalize it
pub fn absolute_path(path: &Path) -> Result<PathBuf, RefError> {
    if path.is_absolute() {
        return Ok(normalize_path(path));
    }
    let cwd = env::current_dir().map_err(|source| RefError::CurrentDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_path(&cwd.join(path)))
}

/// Fold `.` and `..` components lexically
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

//! Transitive reference discovery
//!
//! Walks the reference graph depth-first from an entry file. Every file
//! reached for the first time is read, reported once, and then scanned before
//! the walk returns to the next directive of the file that referenced it.
//! The traversal keeps an explicit stack of open files, so deep reference
//! chains don't grow the call stack.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::vec;

use tracing::{debug, trace};

use crate::directive::{scan_directives, ReferenceDirective};
use crate::error::{RefError, ReferenceOrigin};
use crate::path::absolute_path;

/// Absolute paths already discovered during one resolution pass
pub type VisitedSet = HashSet<PathBuf>;

/// A file whose directives are still being walked
struct Frame {
    path: PathBuf,
    dir: PathBuf,
    pending: vec::IntoIter<ReferenceDirective>,
}

impl Frame {
    fn new(path: PathBuf, source: &str) -> Self {
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| path.clone());
        Self {
            pending: scan_directives(source).into_iter(),
            path,
            dir,
        }
    }
}

/// Discover every file reachable through reference directives from `path`.
///
/// `source` is the entry file's text; when `None` it is read from disk.
/// `on_found` receives each newly discovered absolute path exactly once, in
/// pre-order. The entry itself is marked visited but never reported. A file
/// that cannot be read aborts the whole pass and is not reported.
pub fn discover_references<F>(
    path: &Path,
    source: Option<&str>,
    visited: &mut VisitedSet,
    mut on_found: F,
) -> Result<(), RefError>
where
    F: FnMut(&Path),
{
    let entry = absolute_path(path)?;
    visited.insert(entry.clone());

    let entry_frame = match source {
        Some(text) => Frame::new(entry, text),
        None => {
            let text = fs::read_to_string(&entry).map_err(|source| RefError::FileRead {
                path: entry.clone(),
                origin: None,
                source,
            })?;
            Frame::new(entry, &text)
        }
    };

    let mut stack = vec![entry_frame];

    while let Some(frame) = stack.last_mut() {
        let Some(directive) = frame.pending.next() else {
            stack.pop();
            continue;
        };

        let target = directive.resolve(&frame.dir);
        if visited.contains(&target) {
            trace!(path = %target.display(), "already visited");
            continue;
        }

        let text = fs::read_to_string(&target).map_err(|source| RefError::FileRead {
            path: target.clone(),
            origin: Some(ReferenceOrigin {
                file: frame.path.clone(),
                line: directive.line,
                span: directive.source_span(),
            }),
            source,
        })?;

        debug!(
            path = %target.display(),
            from = %frame.path.display(),
            line = directive.line,
            "discovered reference"
        );
        visited.insert(target.clone());
        on_found(&target);
        stack.push(Frame::new(target, &text));
    }

    Ok(())
}

/// Discovery order of all files referenced from `path`, entry excluded
pub fn collect_references(path: &Path, source: Option<&str>) -> Result<Vec<PathBuf>, RefError> {
    let mut visited = VisitedSet::new();
    let mut found = Vec::new();
    discover_references(path, source, &mut visited, |p| found.push(p.to_path_buf()))?;
    Ok(found)
}

//! Dependency tracking
//!
//! The host pipeline decides what "depends on" means (cache keys, file
//! watchers, ...). The driver only reports absolute paths through
//! [`DependencyTracker`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Receives every file an output depends on
pub trait DependencyTracker {
    fn depend_on(&mut self, path: &Path);
}

impl<F> DependencyTracker for F
where
    F: FnMut(&Path),
{
    fn depend_on(&mut self, path: &Path) {
        self(path)
    }
}

/// Ordered set of dependency paths
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    paths: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths in the order they were first reported
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl DependencyTracker for DependencySet {
    fn depend_on(&mut self, path: &Path) {
        if self.seen.insert(path.to_path_buf()) {
            self.paths.push(path.to_path_buf());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_first_report_order() {
        let mut set = DependencySet::new();
        set.depend_on(Path::new("/b.ts"));
        set.depend_on(Path::new("/a.ts"));
        set.depend_on(Path::new("/b.ts"));

        assert_eq!(set.paths(), [PathBuf::from("/b.ts"), PathBuf::from("/a.ts")]);
        assert!(set.contains(Path::new("/a.ts")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_closure_tracker() {
        let mut seen = Vec::new();
        {
            let mut tracker = |p: &Path| seen.push(p.to_path_buf());
            tracker.depend_on(Path::new("/x.ts"));
        }
        assert_eq!(seen, vec![PathBuf::from("/x.ts")]);
    }
}

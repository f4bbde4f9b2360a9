//! Point-in-time listing of a directory's regular files

use ahash::AHashMap;
use std::time::SystemTime;

/// Mapping from filename to last-modified time for one directory
///
/// Only regular files are ever inserted; the capture side is responsible
/// for filtering out directories and other entry kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: AHashMap<String, SystemTime>,
}

impl Snapshot {
    /// Create a new empty snapshot
    pub fn new() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    /// Record a file's modification time, replacing any earlier record
    pub fn insert(&mut self, name: impl Into<String>, mtime: SystemTime) {
        self.entries.insert(name.into(), mtime);
    }

    /// Get the recorded modification time for a file
    pub fn get(&self, name: &str) -> Option<SystemTime> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get the number of files in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(filename, mtime)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, SystemTime)> {
        self.entries.iter().map(|(name, mtime)| (name.as_str(), *mtime))
    }

    /// Filenames sorted lexicographically
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<(S, SystemTime)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (S, SystemTime)>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for (name, mtime) in iter {
            snapshot.insert(name, mtime);
        }
        snapshot
    }
}

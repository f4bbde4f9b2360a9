//! Snapshot comparison
//!
//! Classifies every filename seen in two snapshots as created, modified,
//! deleted or unchanged. Unchanged names are dropped.

use crate::Snapshot;
use ahash::AHashSet;

/// Three disjoint sets of filenames derived from two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Present in the current snapshot only
    pub created: AHashSet<String>,
    /// Present in both with a different modification time
    pub modified: AHashSet<String>,
    /// Present in the previous snapshot only
    pub deleted: AHashSet<String>,
}

impl ChangeSet {
    /// True when no file changed
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    /// Total number of changed files
    pub fn len(&self) -> usize {
        self.created.len() + self.modified.len() + self.deleted.len()
    }
}

/// Compute the changes between `previous` and `current`
///
/// Any difference in modification time counts as a modification, including
/// a file whose mtime moved backwards.
pub fn diff(previous: &Snapshot, current: &Snapshot) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for (name, mtime) in current.iter() {
        match previous.get(name) {
            None => {
                changes.created.insert(name.to_string());
            }
            Some(old) if old != mtime => {
                changes.modified.insert(name.to_string());
            }
            Some(_) => {}
        }
    }

    for (name, _) in previous.iter() {
        if !current.contains(name) {
            changes.deleted.insert(name.to_string());
        }
    }

    changes
}

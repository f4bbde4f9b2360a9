//! Core data model for dirwatch
//!
//! This crate provides:
//! - Directory snapshots (filename -> modification time)
//! - Change sets and the snapshot diff
//! - File events emitted by the reporter

pub mod diff;
pub mod event;
pub mod snapshot;

// Re-exports
pub use diff::{diff, ChangeSet};
pub use event::{FileContent, FileEvent};
pub use snapshot::Snapshot;

//! Polling directory watcher
//!
//! This crate provides:
//! - Snapshot capture of a directory's regular files
//! - Ignore rules applied at capture time
//! - Change reporting through an [`EventSink`]
//! - The polling loop with cooperative cancellation

pub mod capture;
pub mod error;
pub mod ignore;
pub mod poll;
pub mod report;

pub use capture::capture;
pub use error::WatchError;
pub use crate::ignore::IgnoreRules;
pub use poll::{Phase, PollingWatcher, StopReason, WatcherState};
pub use report::{report, ChannelSink, EventSink, IterationSummary};

pub use dirwatch_core::{ChangeSet, FileContent, FileEvent, Snapshot};

/// Result type for watcher operations
pub type Result<T> = std::result::Result<T, WatchError>;

//! Change reporting
//!
//! Turns a [`ChangeSet`] into [`FileEvent`]s, reading the contents of
//! created and modified files, and hands each event to an [`EventSink`].

use crate::WatchError;
use dirwatch_core::{ChangeSet, FileContent, FileEvent};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Destination for reported events
pub trait EventSink {
    fn emit(&mut self, event: FileEvent);
}

impl EventSink for Vec<FileEvent> {
    fn emit(&mut self, event: FileEvent) {
        self.push(event);
    }
}

/// Forwards events over an unbounded channel
///
/// Events are dropped once the receiver has gone away.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<FileEvent>,
}

impl ChannelSink {
    /// Create a sink together with its receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<FileEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: FileEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!("Event receiver closed, dropping {}", e.0);
        }
    }
}

/// Per-iteration event counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterationSummary {
    pub created: usize,
    pub modified: usize,
    pub deleted: usize,
    /// Created/modified events that carry a read-failure marker
    pub read_failures: usize,
}

impl IterationSummary {
    pub fn total(&self) -> usize {
        self.created + self.modified + self.deleted
    }
}

/// Report every change in `changes` to `sink`
///
/// Creations come first, then modifications, then deletions; names within
/// each group are sorted. A file that cannot be read still produces its event
/// with [`FileContent::ReadFailed`].
pub fn report(dir: &Path, changes: &ChangeSet, sink: &mut dyn EventSink) -> IterationSummary {
    let mut summary = IterationSummary::default();

    for name in sorted(&changes.created) {
        let content = read_content(dir, name);
        summary.created += 1;
        summary.read_failures += content.is_read_failure() as usize;
        sink.emit(FileEvent::Created {
            name: name.to_string(),
            content,
        });
    }

    for name in sorted(&changes.modified) {
        let content = read_content(dir, name);
        summary.modified += 1;
        summary.read_failures += content.is_read_failure() as usize;
        sink.emit(FileEvent::Modified {
            name: name.to_string(),
            content,
        });
    }

    for name in sorted(&changes.deleted) {
        summary.deleted += 1;
        sink.emit(FileEvent::Deleted {
            name: name.to_string(),
        });
    }

    summary
}

fn sorted<'a>(names: impl IntoIterator<Item = &'a String>) -> Vec<&'a str> {
    let mut names: Vec<&str> = names.into_iter().map(String::as_str).collect();
    names.sort_unstable();
    names
}

/// Read a file's full text; the handle is closed before returning
fn read_content(dir: &Path, name: &str) -> FileContent {
    let path = dir.join(name);
    match std::fs::read_to_string(&path) {
        Ok(text) => FileContent::Text(text),
        Err(source) => {
            let reason = source.to_string();
            warn!(
                "Reporting {} without content: {}",
                name,
                WatchError::FileReadFailed { path, source }
            );
            FileContent::ReadFailed { reason }
        }
    }
}

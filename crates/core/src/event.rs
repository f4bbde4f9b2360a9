//! Events produced by the change reporter

use std::fmt;

/// Contents of a created or modified file, as read at report time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Full UTF-8 text of the file
    Text(String),
    /// The read did not complete; carries the cause for the operator
    ReadFailed { reason: String },
}

impl FileContent {
    pub fn is_read_failure(&self) -> bool {
        matches!(self, FileContent::ReadFailed { .. })
    }
}

/// A single detected change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    Created { name: String, content: FileContent },
    Modified { name: String, content: FileContent },
    Deleted { name: String },
}

impl FileEvent {
    /// Filename the event refers to
    pub fn name(&self) -> &str {
        match self {
            FileEvent::Created { name, .. }
            | FileEvent::Modified { name, .. }
            | FileEvent::Deleted { name } => name,
        }
    }

    /// Content carried by the event (none for deletions)
    pub fn content(&self) -> Option<&FileContent> {
        match self {
            FileEvent::Created { content, .. } | FileEvent::Modified { content, .. } => {
                Some(content)
            }
            FileEvent::Deleted { .. } => None,
        }
    }

    /// Short lowercase label: "created", "modified" or "deleted"
    pub fn kind(&self) -> &'static str {
        match self {
            FileEvent::Created { .. } => "created",
            FileEvent::Modified { .. } => "modified",
            FileEvent::Deleted { .. } => "deleted",
        }
    }
}

impl fmt::Display for FileEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.name())
    }
}

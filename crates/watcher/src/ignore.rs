//! Ignore patterns applied while capturing a snapshot
//!
//! Patterns use gitignore syntax and are matched against bare filenames,
//! since the watcher only looks at the top level of its directory.

use crate::{Result, WatchError};
use ::ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Compiled ignore rules for one watched directory
///
/// With no patterns every regular file is tracked.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    /// Compiled matcher (None when no patterns are configured)
    matcher: Option<Gitignore>,

    /// Patterns as configured, kept for diagnostics
    patterns: Vec<String>,
}

impl IgnoreRules {
    /// Rules that ignore nothing
    pub fn none() -> Self {
        Self {
            matcher: None,
            patterns: Vec::new(),
        }
    }

    /// Compile gitignore-style patterns rooted at `root`
    ///
    /// An invalid pattern is a configuration error.
    pub fn from_patterns(root: &Path, patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self::none());
        }

        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            builder
                .add_line(None, pattern)
                .map_err(|e| WatchError::ConfigInvalid {
                    reason: format!("bad ignore pattern '{}': {}", pattern, e),
                })?;
        }

        let matcher = builder.build().map_err(|e| WatchError::ConfigInvalid {
            reason: format!("failed to compile ignore patterns: {}", e),
        })?;

        Ok(Self {
            matcher: Some(matcher),
            patterns: patterns.to_vec(),
        })
    }

    /// Check if a filename should be left out of snapshots
    pub fn should_ignore(&self, name: &str) -> bool {
        match self.matcher {
            Some(ref matcher) => matcher.matched(Path::new(name), false).is_ignore(),
            None => false,
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::none()
    }
}

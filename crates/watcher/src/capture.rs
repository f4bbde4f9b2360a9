//! Snapshot capture
//!
//! Lists the regular files directly inside a directory together with their
//! modification times. Read-only; nothing in the directory is touched.

use crate::{IgnoreRules, Result, WatchError};
use dirwatch_core::Snapshot;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Capture a snapshot of `dir`
///
/// Fails with [`WatchError::DirectoryUnavailable`] when the directory itself
/// is missing, not a directory, or cannot be listed. Entries that fail
/// mid-scan (deleted while listing, broken symlinks) are skipped.
pub fn capture(dir: &Path, ignore: &IgnoreRules) -> Result<Snapshot> {
    let unavailable = |reason: String| WatchError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        reason,
    };

    let metadata = std::fs::metadata(dir).map_err(|e| unavailable(e.to_string()))?;
    if !metadata.is_dir() {
        return Err(unavailable("not a directory".to_string()));
    }

    let mut snapshot = Snapshot::new();

    // Symlinks are followed so "regular file" is judged on the target
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(unavailable(e.to_string())),
            Err(e) => {
                debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            warn!(
                "Skipping file with non UTF-8 name: {}",
                entry.path().display()
            );
            continue;
        };

        if ignore.should_ignore(name) {
            continue;
        }

        let mtime = match entry
            .metadata()
            .map_err(io::Error::from)
            .and_then(|m| m.modified())
        {
            Ok(mtime) => mtime,
            Err(e) => {
                debug!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        };

        snapshot.insert(name, mtime);
    }

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{set_file_mtime, FileTime};
    use std::fs;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    #[test]
    fn test_captures_regular_files_only() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("a.txt"), b"a").unwrap();
        fs::write(root.join("b.txt"), b"b").unwrap();
        fs::create_dir(root.join("subdir")).unwrap();
        fs::write(root.join("subdir/nested.txt"), b"nested").unwrap();

        let snapshot = capture(root, &IgnoreRules::none()).unwrap();

        assert_eq!(snapshot.sorted_names(), vec!["a.txt", "b.txt"]);
        assert!(!snapshot.contains("subdir"));
        assert!(!snapshot.contains("nested.txt"));
    }

    #[test]
    fn test_records_modification_time() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("dated.txt");
        fs::write(&file, b"x").unwrap();

        let mtime = UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        set_file_mtime(&file, FileTime::from_system_time(mtime)).unwrap();

        let snapshot = capture(temp_dir.path(), &IgnoreRules::none()).unwrap();
        assert_eq!(snapshot.get("dated.txt"), Some(mtime));
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = capture(temp_dir.path(), &IgnoreRules::none()).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let err = capture(&missing, &IgnoreRules::none()).unwrap_err();
        assert!(matches!(err, WatchError::DirectoryUnavailable { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_file_path_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, b"not a dir").unwrap();

        let err = capture(&file, &IgnoreRules::none()).unwrap_err();
        assert!(matches!(err, WatchError::DirectoryUnavailable { .. }));
    }

    #[test]
    fn test_ignore_rules_filter_names() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("keep.txt"), b"k").unwrap();
        fs::write(root.join("keep.txt.swp"), b"swap").unwrap();

        let rules = IgnoreRules::from_patterns(root, &["*.swp".to_string()]).unwrap();
        let snapshot = capture(root, &rules).unwrap();

        assert_eq!(snapshot.sorted_names(), vec!["keep.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_follow_target_kind() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let outside = TempDir::new().unwrap();

        fs::write(outside.path().join("target.txt"), b"t").unwrap();
        std::os::unix::fs::symlink(outside.path().join("target.txt"), root.join("link.txt"))
            .unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("dir-link")).unwrap();
        std::os::unix::fs::symlink(root.join("nowhere"), root.join("broken")).unwrap();

        let snapshot = capture(root, &IgnoreRules::none()).unwrap();
        assert_eq!(snapshot.sorted_names(), vec!["link.txt"]);
    }
}

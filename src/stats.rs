//! Directory statistics for before/after comparison

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while collecting directory statistics
#[derive(Error, Debug)]
pub enum StatsError {
    /// The root exists but cannot be read
    #[error("cannot read directory {path}")]
    Unreadable {
        /// Root that failed
        path: PathBuf,
        #[source]
        /// Underlying error
        source: io::Error,
    },
}

/// Point-in-time measurement of a dependency tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
    /// Non-directory entries below the root
    pub files: u64,
    /// Directories below the root (root excluded)
    pub dirs: u64,
    /// Total length of all regular files
    pub size_bytes: u64,
}

/// Signed difference between two snapshots (before − after)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reduction {
    /// Files removed
    pub files: i64,
    /// Folders removed
    pub dirs: i64,
    /// Bytes reclaimed
    pub size_bytes: i64,
}

impl DirectorySnapshot {
    /// Reduction from `self` (before) to `after`. Never clamped: a tree that
    /// grew yields negative values.
    pub fn reduction_to(&self, after: &DirectorySnapshot) -> Reduction {
        Reduction {
            files: self.files as i64 - after.files as i64,
            dirs: self.dirs as i64 - after.dirs as i64,
            size_bytes: self.size_bytes as i64 - after.size_bytes as i64,
        }
    }
}

/// Walk `root` and count files, folders and bytes.
///
/// A missing root yields an empty snapshot. An unreadable root is an error;
/// unreadable entries further down are logged and skipped.
///
/// # Examples
///
/// ```
/// use modclean_benchmark::stats::collect;
/// use tempfile::TempDir;
///
/// let dir = TempDir::new().unwrap();
/// std::fs::create_dir(dir.path().join("lodash")).unwrap();
/// std::fs::write(dir.path().join("lodash/index.js"), b"hello").unwrap();
///
/// let snapshot = collect(dir.path()).unwrap();
/// assert_eq!((snapshot.files, snapshot.dirs, snapshot.size_bytes), (1, 1, 5));
/// ```
pub fn collect(root: &Path) -> Result<DirectorySnapshot, StatsError> {
    let mut snapshot = DirectorySnapshot::default();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                let source = io::Error::from(err);
                if source.kind() == io::ErrorKind::NotFound {
                    return Ok(DirectorySnapshot::default());
                }
                return Err(StatsError::Unreadable {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                log::warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };

        if entry.depth() == 0 {
            continue;
        }

        let file_type = entry.file_type();
        if file_type.is_dir() {
            snapshot.dirs += 1;
            continue;
        }

        snapshot.files += 1;
        if file_type.is_file() {
            match entry.metadata() {
                Ok(meta) => snapshot.size_bytes += meta.len(),
                Err(err) => log::warn!("cannot stat {}: {}", entry.path().display(), err),
            }
        }
    }

    Ok(snapshot)
}

//! Notifications emitted by ModClean during a prune, and their totals

use serde::Deserialize;

/// A path ModClean matched for removal
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    /// Path relative to the workspace
    pub path: String,
    /// Whether the match is a directory
    #[serde(default)]
    pub dir: bool,
}

/// Closed set of messages the bridge writes, one JSON object per line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event")]
pub enum PruneEvent {
    /// Versions of ModClean and of the Node runtime hosting it
    #[serde(rename = "versions")]
    Versions {
        /// ModClean version
        modclean: String,
        /// Node version without the leading `v`
        node: String,
    },

    /// Full candidate list, sent once before removal
    #[serde(rename = "file:list")]
    FileList {
        /// Matched entries
        files: Vec<Candidate>,
    },

    /// Directories found empty after removal
    #[serde(rename = "emptydir:list")]
    EmptyDirList {
        /// Empty directory paths
        dirs: Vec<String>,
    },

    /// One entry that was matched but not removed
    #[serde(rename = "file:skipped")]
    FileSkipped {
        /// Entry name
        name: String,
        /// Whether the entry is an installed package directory
        #[serde(rename = "isModule", default)]
        is_module: bool,
    },

    /// The prune failed
    #[serde(rename = "error")]
    Error {
        /// Failure description
        message: String,
    },
}

impl PruneEvent {
    /// Decode one bridge output line. Lines that are not events (stray
    /// console output from ModClean or its dependencies) yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('{') {
            if !line.is_empty() {
                log::debug!("bridge: {}", line);
            }
            return None;
        }

        match serde_json::from_str(line) {
            Ok(event) => Some(event),
            Err(err) => {
                log::debug!("ignoring unrecognised bridge line ({}): {}", err, line);
                None
            }
        }
    }
}

/// Counts reported by ModClean over one prune
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTotals {
    /// Files removed
    pub files: u64,
    /// Folders removed
    pub folders: u64,
    /// Empty directories removed
    pub empty: u64,
    /// Entries skipped
    pub skipped: u64,
    /// Names of skipped package directories
    pub skipped_modules: Vec<String>,
}

impl RunTotals {
    /// Fold one event into the totals. Version and error events carry no
    /// counts and are ignored here.
    pub fn apply(&mut self, event: &PruneEvent) {
        match event {
            PruneEvent::FileList { files } => {
                let dirs = files.iter().filter(|f| f.dir).count() as u64;
                self.files = (files.len() as u64).abs_diff(dirs);
                self.folders = dirs;
            }
            PruneEvent::EmptyDirList { dirs } => {
                self.empty = dirs.len() as u64;
            }
            PruneEvent::FileSkipped { name, is_module } => {
                self.skipped += 1;
                if *is_module {
                    self.skipped_modules.push(name.clone());
                }
            }
            PruneEvent::Versions { .. } | PruneEvent::Error { .. } => {}
        }
    }
}

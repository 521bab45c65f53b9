#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! modclean-benchmark library
//!
//! Measures how much a ModClean run shrinks a freshly installed
//! `node_modules`: packages are installed into a throwaway directory, the
//! tree is measured, pruned and measured again, and the difference is
//! rendered as a console or markdown report.
//!
//! # Basic Example
//!
//! Building a configuration and the options ModClean receives:
//!
//! ```
//! use modclean_benchmark::config::{parse_list, BenchmarkConfig};
//! use std::path::Path;
//!
//! let config = BenchmarkConfig::default()
//!     .with_test_name(Some("express-only".to_string()))
//!     .with_modules(parse_list("express"))
//!     .with_patterns(parse_list("default:safe,default:caution"));
//!
//! let base = Path::new("/tmp/bench");
//! assert_eq!(config.log_file(base), Path::new("/tmp/bench/express-only-result.md"));
//!
//! let options = config.pruner_options(&config.workspace_dir(base));
//! assert!(options.ignore_case);
//! assert_eq!(options.patterns.len(), 2);
//! ```
//!
//! # Measuring a Directory
//!
//! ```
//! use modclean_benchmark::stats;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let dir = TempDir::new().unwrap();
//! fs::create_dir(dir.path().join("lodash")).unwrap();
//! fs::write(dir.path().join("lodash/index.js"), "module.exports = {}").unwrap();
//!
//! let snapshot = stats::collect(dir.path()).unwrap();
//! assert_eq!(snapshot.files, 1);
//! assert_eq!(snapshot.dirs, 1);
//! assert_eq!(snapshot.size_bytes, 19);
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Benchmark configuration and ModClean options
pub mod config;
/// Report date, author and host description
pub mod environment;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// npm package installation
pub mod installer;
/// ModClean invocation and its progress events
pub mod pruner;
/// Console and markdown report rendering
pub mod report;
/// Benchmark run orchestration
pub mod runner;
/// Directory statistics
pub mod stats;

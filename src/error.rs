//! Error types with contextual suggestions
//!
//! Every fatal failure of a benchmark run is a [`BenchmarkError`]. The CLI
//! prints it through [`ErrorFormatter`], which walks the source chain and
//! appends a suggested fix.
//!
//! # Examples
//!
//! ```no_run
//! use modclean_benchmark::config::BenchmarkConfig;
//! use modclean_benchmark::runner::{BenchmarkRunner, NoOpObserver};
//! use std::time::Instant;
//!
//! let runner = BenchmarkRunner::new(BenchmarkConfig::default(), ".", Instant::now());
//! match runner.run(&NoOpObserver) {
//!     Ok(outcome) => println!("{}", outcome.report.text()),
//!     Err(e) => {
//!         eprintln!("Benchmark failed: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::installer::InstallError;
use crate::pruner::PruneError;
use crate::stats::StatsError;

/// Fatal benchmark errors
#[derive(Error, Debug)]
pub enum BenchmarkError {
    /// Required tool is not installed
    #[error("Tool not installed: {tool}")]
    ToolMissing {
        /// Tool name
        tool: String,
        /// Installation hint
        install_hint: String,
    },

    /// The workspace directory could not be created
    #[error("Unable to create test directory {path}")]
    WorkspaceCreation {
        /// Directory that failed
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Installing the benchmark packages failed
    #[error("Package installation failed")]
    Install(#[from] InstallError),

    /// Collecting directory statistics failed
    #[error("Unable to gather directory statistics")]
    Stats(#[from] StatsError),

    /// ModClean failed
    #[error("ModClean run failed")]
    Prune(#[from] PruneError),
}

impl BenchmarkError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use modclean_benchmark::error::BenchmarkError;
    ///
    /// let error = BenchmarkError::ToolMissing {
    ///     tool: "npm".to_string(),
    ///     install_hint: "Install Node.js from https://nodejs.org".to_string(),
    /// };
    ///
    /// assert!(error.suggestion().unwrap().contains("nodejs.org"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ToolMissing { install_hint, .. } => Some(install_hint.clone()),
            Self::WorkspaceCreation { path, .. } => Some(format!(
                "Check that {} is writable and the disk is not full",
                path.parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| path.display().to_string())
            )),
            Self::Install(InstallError::Spawn { program, .. }) => Some(format!(
                "Ensure {} is installed and on PATH (or pass --npm)",
                program
            )),
            Self::Install(InstallError::Failed { stderr, .. }) => {
                if stderr.contains("404") || stderr.contains("E404") {
                    Some("One of the requested modules does not exist; check --modules".to_string())
                } else {
                    Some("Check your network connection and the npm output shown above".to_string())
                }
            }
            Self::Stats(_) => {
                Some("Check permissions on the test directory's node_modules".to_string())
            }
            Self::Prune(PruneError::Spawn { program, .. }) => Some(format!(
                "Ensure {} is installed and on PATH (or pass --node)",
                program
            )),
            Self::Prune(PruneError::Failed(msg)) if msg.contains("load modclean") => Some(
                "Install ModClean with `npm install -g modclean` or pass --modclean-path"
                    .to_string(),
            ),
            Self::Prune(_) => None,
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(bench_error) = error.downcast_ref::<BenchmarkError>() {
            if let Some(suggestion) = bench_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }
}

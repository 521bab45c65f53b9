//! Benchmark result model

use crate::config::BenchmarkConfig;
use crate::pruner::RunTotals;
use crate::stats::{DirectorySnapshot, Reduction};

/// Placeholder for versions a collaborator did not report
pub const UNKNOWN: &str = "Unknown";

/// Phase durations in milliseconds, unset until the phase completes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timings {
    /// `npm install`
    pub install_ms: Option<u64>,
    /// ModClean run
    pub prune_ms: Option<u64>,
    /// Whole run, from process start to report
    pub total_ms: Option<u64>,
}

/// Versions of the tools involved in the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versions {
    /// ModClean version
    pub modclean: String,
    /// Node runtime version
    pub node: String,
    /// npm version
    pub npm: String,
}

impl Default for Versions {
    fn default() -> Self {
        Self {
            modclean: UNKNOWN.to_string(),
            node: UNKNOWN.to_string(),
            npm: UNKNOWN.to_string(),
        }
    }
}

/// Everything measured during one benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    /// Configuration the run used
    pub config: BenchmarkConfig,
    /// Dependency tree before pruning
    pub before: DirectorySnapshot,
    /// Dependency tree after pruning
    pub after: DirectorySnapshot,
    /// Counts reported by ModClean
    pub totals: RunTotals,
    /// Phase durations
    pub timings: Timings,
    /// Tool versions
    pub versions: Versions,
}

impl BenchmarkResult {
    /// Empty result for `config`, filled in as the run progresses
    pub fn new(config: BenchmarkConfig) -> Self {
        Self {
            config,
            before: DirectorySnapshot::default(),
            after: DirectorySnapshot::default(),
            totals: RunTotals::default(),
            timings: Timings::default(),
            versions: Versions::default(),
        }
    }

    /// before − after for files, folders and bytes
    pub fn reduction(&self) -> Reduction {
        self.before.reduction_to(&self.after)
    }
}

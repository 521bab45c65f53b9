//! Benchmark configuration
//!
//! [`BenchmarkConfig`] is built once from CLI input and never mutated
//! afterwards. It also derives the [`PrunerOptions`] handed to ModClean.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Packages installed when none are requested
pub const DEFAULT_MODULES: [&str; 4] = ["express", "lodash", "moment", "async"];

/// Pattern preset used when none are requested
pub const DEFAULT_PATTERNS: [&str; 1] = ["default:safe"];

/// Directory (inside the workspace) the installer populates
pub const MODULES_DIR: &str = "node_modules";

/// Output format for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Coloured console table and statistics
    #[default]
    Console,
    /// Markdown with command line, details block and footer
    Markdown,
}

/// Immutable configuration for one benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Test name, also the workspace directory name
    pub test_name: String,
    /// Packages to install (never empty)
    pub modules: Vec<String>,
    /// ModClean pattern identifiers (never empty)
    pub patterns: Vec<String>,
    /// Extra glob patterns to remove
    pub additional_patterns: Vec<String>,
    /// Glob patterns to keep
    pub ignore_patterns: Vec<String>,
    /// Match patterns case sensitively
    pub case_sensitive: bool,
    /// Never remove directories
    pub no_dirs: bool,
    /// Never remove dotfiles
    pub no_dotfiles: bool,
    /// Keep directories left empty by the prune
    pub keep_empty: bool,
    /// Remove the workspace after the run
    pub clean: bool,
    /// Write `<test name>-result.md` after the run
    pub log: bool,
    /// Report format
    pub format: ReportFormat,
    /// Installer program (`npm` unless overridden)
    pub npm_program: String,
    /// Node program used to run the ModClean bridge
    pub node_program: String,
    /// Explicit path to the ModClean package, if not resolvable by Node
    pub modclean_path: Option<PathBuf>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            test_name: generated_test_name(),
            modules: to_strings(&DEFAULT_MODULES),
            patterns: to_strings(&DEFAULT_PATTERNS),
            additional_patterns: Vec::new(),
            ignore_patterns: Vec::new(),
            case_sensitive: false,
            no_dirs: false,
            no_dotfiles: false,
            keep_empty: false,
            clean: true,
            log: true,
            format: ReportFormat::Console,
            npm_program: "npm".to_string(),
            node_program: "node".to_string(),
            modclean_path: None,
        }
    }
}

impl BenchmarkConfig {
    /// Replace the package list, falling back to the defaults when `modules`
    /// holds no non-blank entry.
    pub fn with_modules(mut self, modules: Vec<String>) -> Self {
        self.modules = non_empty_or(clean_list(modules), &DEFAULT_MODULES);
        self
    }

    /// Replace the pattern list, falling back to `default:safe` when
    /// `patterns` holds no non-blank entry.
    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = non_empty_or(clean_list(patterns), &DEFAULT_PATTERNS);
        self
    }

    /// Set additional glob patterns
    pub fn with_additional_patterns(mut self, patterns: Vec<String>) -> Self {
        self.additional_patterns = clean_list(patterns);
        self
    }

    /// Set ignore glob patterns
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = clean_list(patterns);
        self
    }

    /// Override the generated test name. Blank names keep the generated one.
    pub fn with_test_name(mut self, name: Option<String>) -> Self {
        if let Some(name) = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            self.test_name = name;
        }
        self
    }

    /// Workspace directory for this run under `base`
    pub fn workspace_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.test_name)
    }

    /// Dependency directory measured before and after the prune
    pub fn modules_dir(&self, base: &Path) -> PathBuf {
        self.workspace_dir(base).join(MODULES_DIR)
    }

    /// Result log written under `base` when logging is enabled
    pub fn log_file(&self, base: &Path) -> PathBuf {
        base.join(format!("{}-result.md", self.test_name))
    }

    /// Options handed to ModClean for a workspace at `cwd`
    pub fn pruner_options(&self, cwd: &Path) -> PrunerOptions {
        PrunerOptions {
            cwd: cwd.to_path_buf(),
            patterns: self.patterns.clone(),
            additional_patterns: self.additional_patterns.clone(),
            ignore_patterns: self.ignore_patterns.clone(),
            no_dirs: self.no_dirs,
            dot_files: !self.no_dotfiles,
            remove_empty_dirs: !self.keep_empty,
            ignore_case: !self.case_sensitive,
        }
    }

    /// Command line reproducing this run's modules and patterns
    pub fn command_line(&self) -> String {
        format!(
            "modclean-benchmark -m {} --patterns=\"{}\"",
            self.modules.join(","),
            self.patterns.join(",")
        )
    }
}

/// Configuration object understood by ModClean's programmatic API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrunerOptions {
    /// Directory containing `node_modules`
    pub cwd: PathBuf,
    /// Pattern identifiers such as `default:safe`
    pub patterns: Vec<String>,
    /// Extra glob patterns to remove
    pub additional_patterns: Vec<String>,
    /// Glob patterns to keep
    pub ignore_patterns: Vec<String>,
    /// Never remove directories
    pub no_dirs: bool,
    /// Allow removal of dotfiles
    pub dot_files: bool,
    /// Remove directories the prune leaves empty
    pub remove_empty_dirs: bool,
    /// Match patterns case insensitively
    pub ignore_case: bool,
}

/// Split a comma separated CLI value into trimmed entries
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn generated_test_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("mc-benchmark-{}", millis)
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn non_empty_or(values: Vec<String>, defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        to_strings(defaults)
    } else {
        values
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

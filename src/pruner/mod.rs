//! ModClean pruning collaborator
//!
//! ModClean is a Node library, so the harness drives it through a small
//! bridge script run with `node -e`. The bridge subscribes to ModClean's
//! notifications before starting the clean and forwards each one as a JSON
//! line, which [`PruneEvent::parse`] turns back into typed events.

/// Bridge events and their totals
pub mod events;

pub use events::{Candidate, PruneEvent, RunTotals};

use crate::config::PrunerOptions;
use crate::infra::{CommandExecutor, RealCommandExecutor};
use crate::installer::Installer;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Node script hosting ModClean
pub const BRIDGE_SCRIPT: &str = include_str!("bridge.js");

/// Environment variable carrying the serialized [`PrunerOptions`]
pub const OPTIONS_ENV: &str = "MODCLEAN_BENCHMARK_OPTIONS";

/// Environment variable naming an explicit ModClean module path
pub const MODCLEAN_PATH_ENV: &str = "MODCLEAN_PATH";

/// Errors raised while pruning
#[derive(Error, Debug)]
pub enum PruneError {
    /// Node could not be spawned
    #[error("failed to run {program}")]
    Spawn {
        /// Program name
        program: String,
        #[source]
        /// Spawn error
        source: std::io::Error,
    },

    /// Options could not be serialized for the bridge
    #[error("invalid pruner options: {0}")]
    Options(#[from] serde_json::Error),

    /// ModClean reported an error or the bridge exited unsuccessfully
    #[error("ModClean failed: {0}")]
    Failed(String),
}

/// A pruning tool that reports its progress through [`PruneEvent`]s
pub trait Pruner {
    /// Run one prune, delivering events to `on_event` in emission order.
    /// Returns once the tool has finished.
    fn prune(
        &self,
        options: &PrunerOptions,
        on_event: &mut dyn FnMut(&PruneEvent),
    ) -> Result<(), PruneError>;
}

/// Runs ModClean through the Node bridge
#[derive(Debug, Clone)]
pub struct ModcleanPruner<CE: CommandExecutor = RealCommandExecutor> {
    node_program: String,
    modclean_path: Option<PathBuf>,
    global_modules: Option<Installer<CE>>,
    cmd_executor: CE,
}

impl ModcleanPruner<RealCommandExecutor> {
    /// Create a pruner running the bridge with `node_program`
    pub fn new(node_program: impl Into<String>) -> Self {
        Self::with_executor(node_program, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor> ModcleanPruner<CE> {
    /// Create a pruner with a custom command executor
    pub fn with_executor(node_program: impl Into<String>, cmd_executor: CE) -> Self {
        Self {
            node_program: node_program.into(),
            modclean_path: None,
            global_modules: None,
            cmd_executor,
        }
    }

    /// Load ModClean from an explicit path instead of Node module resolution
    pub fn with_modclean_path(mut self, path: Option<PathBuf>) -> Self {
        self.modclean_path = path;
        self
    }

    /// Append `installer`'s global package root to `NODE_PATH` so a globally
    /// installed ModClean resolves. The root is queried when a prune starts.
    pub fn with_global_modules_from(mut self, installer: Installer<CE>) -> Self {
        self.global_modules = Some(installer);
        self
    }

    fn node_path(&self, cwd: &Path) -> Option<OsString> {
        let extra = self.global_modules.as_ref()?.global_root(cwd)?;
        log::debug!("adding {} to NODE_PATH", extra);
        let mut paths: Vec<PathBuf> = std::env::var_os("NODE_PATH")
            .map(|p| std::env::split_paths(&p).collect())
            .unwrap_or_default();
        paths.push(PathBuf::from(extra));
        std::env::join_paths(paths).ok()
    }
}

impl<CE: CommandExecutor> Pruner for ModcleanPruner<CE> {
    fn prune(
        &self,
        options: &PrunerOptions,
        on_event: &mut dyn FnMut(&PruneEvent),
    ) -> Result<(), PruneError> {
        let options_json = serde_json::to_string(options)?;

        let mut cmd = std::process::Command::new(&self.node_program);
        cmd.current_dir(&options.cwd)
            .arg("-e")
            .arg(BRIDGE_SCRIPT)
            .env(OPTIONS_ENV, options_json);
        if let Some(path) = &self.modclean_path {
            cmd.env(MODCLEAN_PATH_ENV, path);
        }
        if let Some(node_path) = self.node_path(&options.cwd) {
            cmd.env("NODE_PATH", node_path);
        }

        log::debug!("running ModClean bridge in {}", options.cwd.display());

        let mut failure: Option<String> = None;
        let status = self
            .cmd_executor
            .stream_lines(&mut cmd, &mut |line| {
                if let Some(event) = PruneEvent::parse(line) {
                    if let PruneEvent::Error { message } = &event {
                        failure = Some(message.clone());
                    }
                    on_event(&event);
                }
            })
            .map_err(|source| PruneError::Spawn {
                program: self.node_program.clone(),
                source,
            })?;

        if let Some(message) = failure {
            return Err(PruneError::Failed(message));
        }
        if !status.success() {
            return Err(PruneError::Failed(format!("bridge exited with {}", status)));
        }

        Ok(())
    }
}

//! Package installer (npm) collaborator
//!
//! Only the success or failure of an install and the installer's version are
//! used; npm's output is never parsed beyond that.

use crate::infra::{CommandExecutor, RealCommandExecutor};
use crate::runner::UNKNOWN;
use std::path::Path;
use thiserror::Error;

/// Errors raised by the installer
#[derive(Error, Debug)]
pub enum InstallError {
    /// The installer binary could not be found or spawned
    #[error("failed to run {program}")]
    Spawn {
        /// Program name
        program: String,
        #[source]
        /// Spawn error
        source: std::io::Error,
    },

    /// The installer exited unsuccessfully
    #[error("`{command}` exited with {status}{}", stderr_tail(.stderr))]
    Failed {
        /// Command line that failed
        command: String,
        /// Exit status description
        status: String,
        /// Captured stderr
        stderr: String,
    },
}

fn stderr_tail(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{}", stderr)
    }
}

/// npm installer wrapper
#[derive(Debug, Clone)]
pub struct Installer<CE: CommandExecutor = RealCommandExecutor> {
    program: String,
    cmd_executor: CE,
}

impl Installer<RealCommandExecutor> {
    /// Create an installer running `program` for real
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_executor(program, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor> Installer<CE> {
    /// Create an installer with a custom command executor
    pub fn with_executor(program: impl Into<String>, cmd_executor: CE) -> Self {
        Self {
            program: program.into(),
            cmd_executor,
        }
    }

    /// Program name used for every invocation
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check if the installer is available in PATH
    pub fn is_installed(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    /// Version reported by `<program> -v` (first stdout line, trimmed)
    pub fn version(&self, cwd: &Path) -> Result<String, InstallError> {
        let output = self
            .cmd_executor
            .execute(|cmd| cmd.current_dir(cwd).arg("-v"), &self.program)
            .map_err(|source| self.spawn_error(source))?;

        if !output.status.success() {
            return Err(InstallError::Failed {
                command: format!("{} -v", self.program),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let version = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .to_string();

        if version.is_empty() {
            Ok(UNKNOWN.to_string())
        } else {
            Ok(version)
        }
    }

    /// Run `<program> install <packages…>` inside `cwd`
    pub fn install(&self, cwd: &Path, packages: &[String]) -> Result<(), InstallError> {
        let output = self
            .cmd_executor
            .execute(
                |cmd| cmd.current_dir(cwd).arg("install").args(packages),
                &self.program,
            )
            .map_err(|source| self.spawn_error(source))?;

        if !output.status.success() {
            return Err(InstallError::Failed {
                command: format!("{} install {}", self.program, packages.join(" ")),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }

    /// Global package root (`<program> root -g`), if the installer reports one
    pub fn global_root(&self, cwd: &Path) -> Option<String> {
        let output = self
            .cmd_executor
            .execute(|cmd| cmd.current_dir(cwd).arg("root").arg("-g"), &self.program)
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!root.is_empty()).then_some(root)
    }

    fn spawn_error(&self, source: std::io::Error) -> InstallError {
        InstallError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

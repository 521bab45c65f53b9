//! Benchmark orchestration
//!
//! [`BenchmarkRunner`] is an explicit state-sequence executor. Each state has
//! exactly one successor (cleanup is the only branch, decided by
//! configuration) and each transition either succeeds, succeeds with a
//! warning, or fails with a typed [`BenchmarkError`] that aborts the run:
//!
//! ```text
//! Created → DirectoryReady → NpmVersionKnown → ModulesInstalled → StatsBefore
//!   → Pruned → StatsAfter → (CleanedUp | SkippedCleanup) → Reported → Done
//! ```
//!
//! The process working directory is never changed; npm and ModClean receive
//! the workspace as their explicit working directory.

/// Progress notifications
pub mod observer;
/// Measurements collected by a run
pub mod result;

pub use observer::{MemoryObserver, NoOpObserver, ObservedStep, RunObserver};
pub use result::{BenchmarkResult, Timings, Versions, UNKNOWN};

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::BenchmarkConfig;
use crate::environment;
use crate::error::BenchmarkError;
use crate::infra::{CommandExecutor, FileSystem, RealCommandExecutor, RealFileSystem};
use crate::installer::Installer;
use crate::pruner::{ModcleanPruner, PruneEvent, Pruner};
use crate::report::{Report, ReportContext, ReportFormatter};
use crate::stats;

/// States of a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Nothing has happened yet
    Created,
    /// Workspace and its `node_modules` exist
    DirectoryReady,
    /// npm version recorded (or `Unknown`)
    NpmVersionKnown,
    /// Packages installed
    ModulesInstalled,
    /// "before" snapshot taken
    StatsBefore,
    /// ModClean finished
    Pruned,
    /// "after" snapshot taken
    StatsAfter,
    /// Workspace removed (or removal attempted and warned)
    CleanedUp,
    /// Workspace kept on request
    SkippedCleanup,
    /// Report rendered and optionally logged
    Reported,
    /// Run complete
    Done,
    /// A fatal error aborted the run
    Failed,
}

/// Everything a successful run produces
#[derive(Debug, Clone)]
pub struct BenchmarkOutcome {
    /// Measurements
    pub result: BenchmarkResult,
    /// Rendered report
    pub report: Report,
    /// Log file written, if logging was enabled and the write succeeded
    pub log_file: Option<PathBuf>,
    /// Recoverable problems met along the way
    pub warnings: Vec<String>,
}

enum StepOutcome {
    Completed,
    Warned(String),
}

/// In-progress state owned by a single `run` call
struct Progress {
    result: BenchmarkResult,
    report: Option<Report>,
    log_file: Option<PathBuf>,
    warnings: Vec<String>,
}

/// Runs one benchmark from workspace creation to report
pub struct BenchmarkRunner<
    FS: FileSystem = RealFileSystem,
    CE: CommandExecutor = RealCommandExecutor,
    P: Pruner = ModcleanPruner<RealCommandExecutor>,
> {
    config: BenchmarkConfig,
    base_dir: PathBuf,
    started: Instant,
    fs: FS,
    cmd_executor: CE,
    installer: Installer<CE>,
    pruner: P,
    formatter: ReportFormatter,
    context: Option<ReportContext>,
}

impl BenchmarkRunner {
    /// Create a runner using real npm, node and filesystem.
    ///
    /// `base_dir` is where the workspace and the result log are created and
    /// `started` is the instant the total time is measured from. Unless an
    /// explicit ModClean path is configured, the global npm root is added to
    /// Node's module search path so a globally installed ModClean is found.
    pub fn new(config: BenchmarkConfig, base_dir: impl AsRef<Path>, started: Instant) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let mut pruner = ModcleanPruner::new(config.node_program.clone())
            .with_modclean_path(config.modclean_path.clone());
        if config.modclean_path.is_none() {
            pruner = pruner.with_global_modules_from(Installer::new(config.npm_program.clone()));
        }

        Self::with_collaborators(
            config,
            base_dir,
            started,
            RealFileSystem,
            RealCommandExecutor,
            pruner,
        )
    }
}

impl<FS: FileSystem, CE: CommandExecutor + Clone, P: Pruner> BenchmarkRunner<FS, CE, P> {
    /// Create a runner with custom filesystem, command executor and pruner
    pub fn with_collaborators(
        config: BenchmarkConfig,
        base_dir: impl AsRef<Path>,
        started: Instant,
        fs: FS,
        cmd_executor: CE,
        pruner: P,
    ) -> Self {
        let installer = Installer::with_executor(config.npm_program.clone(), cmd_executor.clone());
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
            started,
            fs,
            cmd_executor,
            installer,
            pruner,
            formatter: ReportFormatter,
            context: None,
        }
    }

    /// Use a fixed report context instead of probing the clock and host
    pub fn with_report_context(mut self, context: ReportContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Configuration this runner uses
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Workspace directory of this run
    pub fn workspace_dir(&self) -> PathBuf {
        self.config.workspace_dir(&self.base_dir)
    }

    /// Run every transition in order until `Done` or the first fatal error.
    ///
    /// A returned `Err` is the `Failed` state: the failing transition has
    /// been reported through [`RunObserver::step_failed`] and no report or
    /// log file is produced.
    pub fn run(&self, observer: &dyn RunObserver) -> Result<BenchmarkOutcome, BenchmarkError> {
        let mut progress = Progress {
            result: BenchmarkResult::new(self.config.clone()),
            report: None,
            log_file: None,
            warnings: Vec::new(),
        };

        let mut state = RunState::Created;
        while let Some(target) = self.successor(state) {
            let message = self.describe(target);
            if let Some(message) = &message {
                observer.step_started(target, message);
            }

            match self.advance(target, &mut progress) {
                Ok(StepOutcome::Completed) => {
                    if message.is_some() {
                        observer.step_succeeded(target);
                    }
                }
                Ok(StepOutcome::Warned(warning)) => {
                    log::warn!("{}", warning);
                    observer.step_warned(target, &warning);
                    progress.warnings.push(warning);
                }
                Err(err) => {
                    log::debug!("{:?} -> {:?}: {}", state, RunState::Failed, err);
                    observer.step_failed(target);
                    return Err(err);
                }
            }

            log::debug!("{:?} -> {:?}", state, target);
            state = target;
        }

        let report = progress
            .report
            .unwrap_or_else(|| self.render(&progress.result, &self.report_context()));
        Ok(BenchmarkOutcome {
            result: progress.result,
            report,
            log_file: progress.log_file,
            warnings: progress.warnings,
        })
    }

    /// Next state after `state`, or `None` once the run is over
    pub fn successor(&self, state: RunState) -> Option<RunState> {
        match state {
            RunState::Created => Some(RunState::DirectoryReady),
            RunState::DirectoryReady => Some(RunState::NpmVersionKnown),
            RunState::NpmVersionKnown => Some(RunState::ModulesInstalled),
            RunState::ModulesInstalled => Some(RunState::StatsBefore),
            RunState::StatsBefore => Some(RunState::Pruned),
            RunState::Pruned => Some(RunState::StatsAfter),
            RunState::StatsAfter if self.config.clean => Some(RunState::CleanedUp),
            RunState::StatsAfter => Some(RunState::SkippedCleanup),
            RunState::CleanedUp | RunState::SkippedCleanup => Some(RunState::Reported),
            RunState::Reported => Some(RunState::Done),
            RunState::Done | RunState::Failed => None,
        }
    }

    /// Progress message for the transition into `target`
    fn describe(&self, target: RunState) -> Option<String> {
        let message = match target {
            RunState::DirectoryReady => format!(
                "Creating test directory: {}",
                self.config.modules_dir(&self.base_dir).display()
            ),
            RunState::NpmVersionKnown => "Getting NPM Version...".to_string(),
            RunState::ModulesInstalled => {
                format!("Installing modules: {}", self.config.modules.join(", "))
            }
            RunState::StatsBefore => "Gathering stats before ModClean...".to_string(),
            RunState::Pruned => "Running ModClean...".to_string(),
            RunState::StatsAfter => "Gathering stats after ModClean...".to_string(),
            RunState::CleanedUp => "Cleaning up...".to_string(),
            RunState::Reported => "Preparing results...".to_string(),
            RunState::Created | RunState::SkippedCleanup | RunState::Done | RunState::Failed => {
                return None
            }
        };
        Some(message)
    }

    fn advance(
        &self,
        target: RunState,
        progress: &mut Progress,
    ) -> Result<StepOutcome, BenchmarkError> {
        let workspace = self.workspace_dir();
        let modules_dir = self.config.modules_dir(&self.base_dir);

        match target {
            RunState::DirectoryReady => {
                self.fs
                    .create_dir_all(&modules_dir)
                    .map_err(|source| BenchmarkError::WorkspaceCreation {
                        path: workspace.clone(),
                        source,
                    })?;
            }
            RunState::NpmVersionKnown => match self.installer.version(&workspace) {
                Ok(version) => progress.result.versions.npm = version,
                Err(err) => {
                    progress.result.versions.npm = UNKNOWN.to_string();
                    return Ok(StepOutcome::Warned(format!(
                        "Unable to determine NPM version: {}",
                        err
                    )));
                }
            },
            RunState::ModulesInstalled => {
                let started = Instant::now();
                self.installer.install(&workspace, &self.config.modules)?;
                progress.result.timings.install_ms = Some(elapsed_ms(started));
            }
            RunState::StatsBefore => {
                progress.result.before = stats::collect(&modules_dir)?;
            }
            RunState::Pruned => {
                let options = self.config.pruner_options(&workspace);
                let totals = &mut progress.result.totals;
                let versions = &mut progress.result.versions;
                let started = Instant::now();

                self.pruner.prune(&options, &mut |event: &PruneEvent| match event {
                    PruneEvent::Versions { modclean, node } => {
                        versions.modclean = modclean.clone();
                        versions.node = node.clone();
                    }
                    other => totals.apply(other),
                })?;

                progress.result.timings.prune_ms = Some(elapsed_ms(started));
            }
            RunState::StatsAfter => {
                progress.result.after = stats::collect(&modules_dir)?;
            }
            RunState::CleanedUp => {
                if let Err(err) = self.fs.remove_dir_all(&workspace) {
                    log::debug!("removing {}: {}", workspace.display(), err);
                    return Ok(StepOutcome::Warned(
                        "Unable to clean up files, please clean up manually".to_string(),
                    ));
                }
            }
            RunState::Reported => {
                progress.result.timings.total_ms = Some(elapsed_ms(self.started));
                let report = self.render(&progress.result, &self.report_context());
                let write = if self.config.log {
                    let log_file = self.config.log_file(&self.base_dir);
                    match self.fs.write(&log_file, report.plain()) {
                        Ok(()) => {
                            progress.log_file = Some(log_file);
                            None
                        }
                        Err(err) => Some(format!(
                            "Unable to write log file {}: {}",
                            log_file.display(),
                            err
                        )),
                    }
                } else {
                    None
                };
                progress.report = Some(report);
                if let Some(warning) = write {
                    return Ok(StepOutcome::Warned(warning));
                }
            }
            RunState::Created
            | RunState::SkippedCleanup
            | RunState::Done
            | RunState::Failed => {}
        }

        Ok(StepOutcome::Completed)
    }

    fn report_context(&self) -> ReportContext {
        self.context
            .clone()
            .unwrap_or_else(|| environment::capture(&self.cmd_executor))
    }

    fn render(&self, result: &BenchmarkResult, context: &ReportContext) -> Report {
        self.formatter.render(result, context, self.config.format)
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    since.elapsed().as_millis() as u64
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::{PrunerOptions, ReportFormat};
    use crate::infra::mock_exit_status;
    use crate::pruner::{Candidate, PruneError};
    use crate::stats::DirectorySnapshot;
    use std::fs;
    use std::io;
    use std::process::{Command, ExitStatus, Output};
    use tempfile::TempDir;

    /// Fake npm: `-v` prints a version, `install` writes three files per
    /// package unless `populate` is off
    #[derive(Clone)]
    struct FakeNpm {
        version_code: i32,
        install_code: i32,
        populate: bool,
    }

    impl FakeNpm {
        fn working() -> Self {
            Self {
                version_code: 0,
                install_code: 0,
                populate: true,
            }
        }
    }

    impl CommandExecutor for FakeNpm {
        fn output(&self, cmd: &mut Command) -> io::Result<Output> {
            let args: Vec<String> = cmd
                .get_args()
                .map(|a| a.to_string_lossy().to_string())
                .collect();
            let reply = |code: i32, stdout: &str| Output {
                status: mock_exit_status(code),
                stdout: stdout.as_bytes().to_vec(),
                stderr: b"npm ERR! code E404".to_vec(),
            };

            match args.first().map(String::as_str) {
                Some("-v") => Ok(reply(self.version_code, "10.2.4\n")),
                Some("install") if self.install_code == 0 && !self.populate => Ok(reply(0, "")),
                Some("install") if self.install_code == 0 => {
                    let cwd = cmd.get_current_dir().expect("install runs in workspace");
                    for package in &args[1..] {
                        let dir = cwd.join("node_modules").join(package);
                        fs::create_dir_all(dir.join("test"))?;
                        fs::write(dir.join("index.js"), vec![b'x'; 100])?;
                        fs::write(dir.join("README.md"), vec![b'x'; 50])?;
                        fs::write(dir.join("test/spec.js"), vec![b'x'; 25])?;
                    }
                    Ok(reply(0, ""))
                }
                Some("install") => Ok(reply(self.install_code, "")),
                _ => Ok(reply(127, "")),
            }
        }

        fn stream_lines(
            &self,
            _cmd: &mut Command,
            _on_line: &mut dyn FnMut(&str),
        ) -> io::Result<ExitStatus> {
            unimplemented!("the runner's installer never streams")
        }
    }

    /// Fake ModClean: removes README.md files and test dirs, reports events
    struct FakePruner {
        fail: bool,
    }

    impl Pruner for FakePruner {
        fn prune(
            &self,
            options: &PrunerOptions,
            on_event: &mut dyn FnMut(&PruneEvent),
        ) -> Result<(), PruneError> {
            on_event(&PruneEvent::Versions {
                modclean: "3.0.0".to_string(),
                node: "20.11.1".to_string(),
            });
            if self.fail {
                return Err(PruneError::Failed("EACCES".to_string()));
            }

            let modules = options.cwd.join("node_modules");
            let mut files = Vec::new();
            for entry in fs::read_dir(&modules).map_err(|e| PruneError::Failed(e.to_string()))? {
                let package = entry.map_err(|e| PruneError::Failed(e.to_string()))?.path();
                let _ = fs::remove_file(package.join("README.md"));
                let _ = fs::remove_dir_all(package.join("test"));
                files.push(Candidate {
                    path: package.join("README.md").display().to_string(),
                    dir: false,
                });
                files.push(Candidate {
                    path: package.join("test").display().to_string(),
                    dir: true,
                });
            }

            on_event(&PruneEvent::FileList { files });
            on_event(&PruneEvent::EmptyDirList { dirs: vec![] });
            on_event(&PruneEvent::FileSkipped {
                name: "lodash".to_string(),
                is_module: true,
            });
            Ok(())
        }
    }

    /// Real filesystem whose directory removal always fails
    #[derive(Clone, Copy)]
    struct StickyFileSystem;

    impl FileSystem for StickyFileSystem {
        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            RealFileSystem.create_dir_all(path)
        }

        fn remove_dir_all(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "busy"))
        }

        fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
            RealFileSystem.write(path, contents)
        }
    }

    /// Real filesystem that refuses to write files
    #[derive(Clone, Copy)]
    struct ReadOnlyFileSystem;

    impl FileSystem for ReadOnlyFileSystem {
        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            RealFileSystem.create_dir_all(path)
        }

        fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
            RealFileSystem.remove_dir_all(path)
        }

        fn write(&self, _path: &Path, _contents: impl AsRef<[u8]>) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    /// Leaves a regular file where the workspace should be, so nothing
    /// below it can be read
    #[derive(Clone, Copy)]
    struct FileAsWorkspace;

    impl FileSystem for FileAsWorkspace {
        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            let workspace = path.parent().expect("modules dir has a parent");
            fs::write(workspace, b"not a directory")
        }

        fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
            fs::remove_file(path)
        }

        fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
            RealFileSystem.write(path, contents)
        }
    }

    fn context() -> ReportContext {
        ReportContext {
            date: "1/2/2026".to_string(),
            author: "tester".to_string(),
            environment: "test host".to_string(),
            width: 60,
        }
    }

    fn config(name: &str) -> BenchmarkConfig {
        BenchmarkConfig::default()
            .with_test_name(Some(name.to_string()))
            .with_modules(vec!["express".to_string(), "lodash".to_string()])
    }

    fn runner<FS: FileSystem>(
        config: BenchmarkConfig,
        base: &Path,
        fs: FS,
        npm: FakeNpm,
        pruner: FakePruner,
    ) -> BenchmarkRunner<FS, FakeNpm, FakePruner> {
        BenchmarkRunner::with_collaborators(config, base, Instant::now(), fs, npm, pruner)
            .with_report_context(context())
    }

    #[test]
    fn test_successful_run_measures_before_and_after() {
        let base = TempDir::new().unwrap();
        let observer = MemoryObserver::new();
        let outcome = runner(
            config("full"),
            base.path(),
            RealFileSystem,
            FakeNpm::working(),
            FakePruner { fail: false },
        )
        .run(&observer)
        .unwrap();

        let result = &outcome.result;
        assert_eq!(
            result.before,
            DirectorySnapshot {
                files: 6,
                dirs: 4,
                size_bytes: 350,
            }
        );
        assert_eq!(
            result.after,
            DirectorySnapshot {
                files: 2,
                dirs: 2,
                size_bytes: 200,
            }
        );
        assert_eq!(result.totals.files, 2);
        assert_eq!(result.totals.folders, 2);
        assert_eq!(result.totals.skipped_modules, vec!["lodash"]);
        assert_eq!(result.versions.npm, "10.2.4");
        assert_eq!(result.versions.modclean, "3.0.0");
        assert_eq!(result.versions.node, "20.11.1");
        assert!(result.timings.install_ms.is_some());
        assert!(result.timings.prune_ms.is_some());
        assert!(result.timings.total_ms.is_some());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_successful_run_visits_states_in_order() {
        let base = TempDir::new().unwrap();
        let observer = MemoryObserver::new();
        runner(
            config("order"),
            base.path(),
            RealFileSystem,
            FakeNpm::working(),
            FakePruner { fail: false },
        )
        .run(&observer)
        .unwrap();

        assert_eq!(
            observer.completed(),
            vec![
                RunState::DirectoryReady,
                RunState::NpmVersionKnown,
                RunState::ModulesInstalled,
                RunState::StatsBefore,
                RunState::Pruned,
                RunState::StatsAfter,
                RunState::CleanedUp,
                RunState::Reported,
            ]
        );
    }

    #[test]
    fn test_cleanup_removes_workspace_and_log_is_written() {
        let base = TempDir::new().unwrap();
        let outcome = runner(
            config("cleaned"),
            base.path(),
            RealFileSystem,
            FakeNpm::working(),
            FakePruner { fail: false },
        )
        .run(&NoOpObserver)
        .unwrap();

        assert!(!base.path().join("cleaned").exists());
        let log_file = outcome.log_file.unwrap();
        assert_eq!(log_file, base.path().join("cleaned-result.md"));
        let logged = fs::read_to_string(log_file).unwrap();
        assert!(logged.contains("Reduction"));
        assert!(!logged.contains('\u{1b}'));
        assert_eq!(logged, outcome.report.plain());
    }

    #[test]
    fn test_no_clean_keeps_workspace() {
        let base = TempDir::new().unwrap();
        let observer = MemoryObserver::new();
        let config = BenchmarkConfig {
            clean: false,
            ..config("kept")
        };
        runner(
            config,
            base.path(),
            RealFileSystem,
            FakeNpm::working(),
            FakePruner { fail: false },
        )
        .run(&observer)
        .unwrap();

        assert!(base.path().join("kept/node_modules/express/index.js").exists());
        assert!(!observer.completed().contains(&RunState::CleanedUp));
    }

    #[test]
    fn test_no_log_writes_nothing() {
        let base = TempDir::new().unwrap();
        let config = BenchmarkConfig {
            log: false,
            ..config("quiet")
        };
        let outcome = runner(
            config,
            base.path(),
            RealFileSystem,
            FakeNpm::working(),
            FakePruner { fail: false },
        )
        .run(&NoOpObserver)
        .unwrap();

        assert!(outcome.log_file.is_none());
        assert!(!base.path().join("quiet-result.md").exists());
    }

    #[test]
    fn test_markdown_format_reaches_report() {
        let base = TempDir::new().unwrap();
        let config = BenchmarkConfig {
            format: ReportFormat::Markdown,
            ..config("md")
        };
        let outcome = runner(
            config,
            base.path(),
            RealFileSystem,
            FakeNpm::working(),
            FakePruner { fail: false },
        )
        .run(&NoOpObserver)
        .unwrap();

        assert!(outcome
            .report
            .text()
            .contains("modclean-benchmark -m express,lodash --patterns=\"default:safe\""));
        assert!(outcome.report.text().contains("> **Author:** tester"));
    }

    #[test]
    fn test_install_failure_aborts_without_log() {
        let base = TempDir::new().unwrap();
        let observer = MemoryObserver::new();
        let npm = FakeNpm {
            install_code: 1,
            ..FakeNpm::working()
        };
        let err = runner(
            config("broken"),
            base.path(),
            RealFileSystem,
            npm,
            FakePruner { fail: false },
        )
        .run(&observer)
        .unwrap_err();

        assert!(matches!(err, BenchmarkError::Install(_)));
        assert!(!base.path().join("broken-result.md").exists());
        assert_eq!(
            observer.steps().last(),
            Some(&ObservedStep::Failed(RunState::ModulesInstalled))
        );
        assert!(!observer.completed().contains(&RunState::Reported));
    }

    #[test]
    fn test_npm_version_failure_is_a_warning() {
        let base = TempDir::new().unwrap();
        let npm = FakeNpm {
            version_code: 1,
            ..FakeNpm::working()
        };
        let outcome = runner(
            config("noversion"),
            base.path(),
            RealFileSystem,
            npm,
            FakePruner { fail: false },
        )
        .run(&NoOpObserver)
        .unwrap();

        assert_eq!(outcome.result.versions.npm, "Unknown");
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("NPM version"));
    }

    #[test]
    fn test_prune_failure_is_fatal() {
        let base = TempDir::new().unwrap();
        let observer = MemoryObserver::new();
        let err = runner(
            config("prunefail"),
            base.path(),
            RealFileSystem,
            FakeNpm::working(),
            FakePruner { fail: true },
        )
        .run(&observer)
        .unwrap_err();

        assert!(matches!(err, BenchmarkError::Prune(_)));
        assert_eq!(
            observer.steps().last(),
            Some(&ObservedStep::Failed(RunState::Pruned))
        );
        assert!(!base.path().join("prunefail-result.md").exists());
    }

    #[test]
    fn test_cleanup_failure_still_reports() {
        let base = TempDir::new().unwrap();
        let observer = MemoryObserver::new();
        let outcome = runner(
            config("sticky"),
            base.path(),
            StickyFileSystem,
            FakeNpm::working(),
            FakePruner { fail: false },
        )
        .run(&observer)
        .unwrap();

        assert!(observer.steps().contains(&ObservedStep::Warned(
            RunState::CleanedUp,
            "Unable to clean up files, please clean up manually".to_string()
        )));
        assert!(outcome.log_file.is_some());
        assert!(observer.completed().contains(&RunState::Reported));
    }

    #[test]
    fn test_log_write_failure_still_reports() {
        let base = TempDir::new().unwrap();
        let observer = MemoryObserver::new();
        let outcome = runner(
            config("unwritable"),
            base.path(),
            ReadOnlyFileSystem,
            FakeNpm::working(),
            FakePruner { fail: false },
        )
        .run(&observer)
        .unwrap();

        assert!(observer.steps().iter().any(|step| matches!(
            step,
            ObservedStep::Warned(RunState::Reported, warning) if warning.contains("log file")
        )));
        assert!(outcome.log_file.is_none());
        assert!(!base.path().join("unwritable-result.md").exists());
        assert!(outcome.report.plain().contains("Before ModClean"));
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_unreadable_modules_dir_aborts_without_log() {
        let base = TempDir::new().unwrap();
        let observer = MemoryObserver::new();
        let npm = FakeNpm {
            populate: false,
            ..FakeNpm::working()
        };
        let err = runner(
            config("unreadable"),
            base.path(),
            FileAsWorkspace,
            npm,
            FakePruner { fail: false },
        )
        .run(&observer)
        .unwrap_err();

        assert!(matches!(err, BenchmarkError::Stats(_)));
        assert_eq!(
            observer.steps().last(),
            Some(&ObservedStep::Failed(RunState::StatsBefore))
        );
        assert!(!base.path().join("unreadable-result.md").exists());
    }

    #[test]
    fn test_workspace_creation_failure_is_fatal() {
        let base = TempDir::new().unwrap();
        fs::write(base.path().join("blocker"), b"file, not a dir").unwrap();
        let err = runner(
            config("blocker"),
            base.path(),
            RealFileSystem,
            FakeNpm::working(),
            FakePruner { fail: false },
        )
        .run(&NoOpObserver)
        .unwrap_err();

        assert!(matches!(err, BenchmarkError::WorkspaceCreation { .. }));
    }

    #[test]
    fn test_successor_chain_ends_at_done() {
        let base = TempDir::new().unwrap();
        let runner = runner(
            config("chain"),
            base.path(),
            RealFileSystem,
            FakeNpm::working(),
            FakePruner { fail: false },
        );
        assert_eq!(
            runner.successor(RunState::StatsAfter),
            Some(RunState::CleanedUp)
        );
        assert_eq!(runner.successor(RunState::Reported), Some(RunState::Done));
        assert_eq!(runner.successor(RunState::Done), None);
        assert_eq!(runner.successor(RunState::Failed), None);
    }
}

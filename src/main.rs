use clap::Parser;
use modclean_benchmark::cmd;
use modclean_benchmark::config::{parse_list, BenchmarkConfig, ReportFormat};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

/// ModClean benchmarking utility
///
/// Installs a set of npm packages into a throwaway directory, runs ModClean
/// over its node_modules and reports how many files, folders and bytes were
/// removed, together with how long each phase took.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Comma separated ModClean patterns to use
    #[arg(short = 'n', long, value_name = "LIST", default_value = "default:safe")]
    patterns: String,

    /// Comma separated npm packages to install
    #[arg(
        short,
        long,
        value_name = "LIST",
        default_value = "express,lodash,moment,async"
    )]
    modules: String,

    /// Comma separated extra glob patterns to remove
    #[arg(short, long, value_name = "LIST")]
    additional_patterns: Option<String>,

    /// Comma separated glob patterns to keep
    #[arg(short = 'I', long, value_name = "LIST")]
    ignore: Option<String>,

    /// Match patterns case sensitively
    #[arg(short = 's', long)]
    case_sensitive: bool,

    /// Never remove directories
    #[arg(long)]
    no_dirs: bool,

    /// Never remove dotfiles
    #[arg(long)]
    no_dotfiles: bool,

    /// Keep directories left empty after pruning
    #[arg(short, long)]
    keep_empty: bool,

    /// Keep the test directory after the run
    #[arg(long)]
    no_clean: bool,

    /// Do not write <name>-result.md
    #[arg(long)]
    no_log: bool,

    /// Name of the test directory and log file
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Render the report as markdown
    #[arg(long)]
    markdown: bool,

    /// npm program used to install packages
    #[arg(long, env = "MODCLEAN_BENCHMARK_NPM", default_value = "npm")]
    npm: String,

    /// Node program used to run ModClean
    #[arg(long, env = "MODCLEAN_BENCHMARK_NODE", default_value = "node")]
    node: String,

    /// Path to the ModClean package (defaults to Node module resolution)
    #[arg(long, env = "MODCLEAN_PATH", value_name = "PATH")]
    modclean_path: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> BenchmarkConfig {
        let config = BenchmarkConfig {
            case_sensitive: self.case_sensitive,
            no_dirs: self.no_dirs,
            no_dotfiles: self.no_dotfiles,
            keep_empty: self.keep_empty,
            clean: !self.no_clean,
            log: !self.no_log,
            format: if self.markdown {
                ReportFormat::Markdown
            } else {
                ReportFormat::Console
            },
            npm_program: self.npm,
            node_program: self.node,
            modclean_path: self.modclean_path,
            ..BenchmarkConfig::default()
        };

        config
            .with_modules(parse_list(&self.modules))
            .with_patterns(parse_list(&self.patterns))
            .with_additional_patterns(
                self.additional_patterns
                    .as_deref()
                    .map(parse_list)
                    .unwrap_or_default(),
            )
            .with_ignore_patterns(self.ignore.as_deref().map(parse_list).unwrap_or_default())
            .with_test_name(self.name)
    }
}

fn main() {
    let started = Instant::now();

    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let config = Cli::parse().into_config();

    if let Err(e) = cmd::cmd_benchmark(config, started) {
        use modclean_benchmark::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        process::exit(1);
    }
}

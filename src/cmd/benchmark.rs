//! Benchmark command implementation
//!
//! Thin presentation layer for a benchmark run.
//! Business logic lives in `runner::BenchmarkRunner`.

use anyhow::Result;
use console::style;
use std::env;
use std::time::Instant;

use crate::cmd::spinner::SpinnerObserver;
use crate::config::BenchmarkConfig;
use crate::error::BenchmarkError;
use crate::fmt::{BROOM, CHART, PAGE};
use crate::runner::{BenchmarkOutcome, BenchmarkRunner};

/// Main benchmark command handler (presentation layer)
///
/// Checks that the configured npm and node programs exist, runs the
/// benchmark in the current directory with spinner progress, then prints
/// the report and where the log was written.
///
/// # Examples
///
/// ```no_run
/// use modclean_benchmark::cmd::cmd_benchmark;
/// use modclean_benchmark::config::BenchmarkConfig;
/// use std::time::Instant;
///
/// cmd_benchmark(BenchmarkConfig::default(), Instant::now())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_benchmark(config: BenchmarkConfig, started: Instant) -> Result<()> {
    println!("{} {}", BROOM, style("MODCLEAN Benchmarking Utility").bold());
    println!();

    preflight(&config)?;

    let base_dir = env::current_dir()?;
    log::debug!(
        "benchmark {} in {}",
        config.test_name,
        base_dir.display()
    );

    let runner = BenchmarkRunner::new(config, &base_dir, started);
    let outcome = {
        let observer = SpinnerObserver::new();
        runner.run(&observer)?
    };

    present_outcome(&outcome);
    Ok(())
}

/// Fail early with an install hint when a required program is missing
fn preflight(config: &BenchmarkConfig) -> Result<(), BenchmarkError> {
    let tools = [
        (&config.npm_program, "--npm"),
        (&config.node_program, "--node"),
    ];
    for (program, flag) in tools {
        if which::which(program).is_err() {
            return Err(BenchmarkError::ToolMissing {
                tool: program.clone(),
                install_hint: format!(
                    "Install Node.js (which ships npm) from https://nodejs.org or pass {} <program>",
                    flag
                ),
            });
        }
    }
    Ok(())
}

fn present_outcome(outcome: &BenchmarkOutcome) {
    println!();
    println!("{} {}", CHART, style("Results").bold());
    println!();
    println!("{}", outcome.report.text());

    if let Some(log_file) = &outcome.log_file {
        println!("{} Log file written to: {}", PAGE, log_file.display());
    }
}

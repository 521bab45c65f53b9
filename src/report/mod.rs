//! Benchmark report rendering
//!
//! [`ReportFormatter`] is a pure function of a [`BenchmarkResult`] and a
//! [`ReportContext`]; the clock- and host-dependent fields arrive through the
//! context so identical inputs always render identically.

/// Markdown table layout
pub mod table;

use console::style;

use crate::config::ReportFormat;
use crate::fmt::{format_bytes, format_duration, format_number};
use crate::runner::BenchmarkResult;

const TABLE_HEADER: [&str; 4] = ["", "Total Files", "Total Folders", "Total Size"];

/// Clock and host information shown in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Date shown as "Last Updated"
    pub date: String,
    /// Author shown in the markdown footer
    pub author: String,
    /// Machine, OS and CPU description
    pub environment: String,
    /// Terminal width used for separator rules
    pub width: usize,
}

/// A rendered report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Format the report was rendered in
    pub format: ReportFormat,
    text: String,
}

impl Report {
    /// Report text as printed to the console (may contain ANSI styling)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Report text with all styling removed, as written to the log file
    pub fn plain(&self) -> String {
        console::strip_ansi_codes(&self.text).into_owned()
    }
}

/// Renders benchmark results as a console or markdown report
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFormatter;

impl ReportFormatter {
    /// Render `result` in `format`
    pub fn render(
        &self,
        result: &BenchmarkResult,
        context: &ReportContext,
        format: ReportFormat,
    ) -> Report {
        let text = match format {
            ReportFormat::Console => self.console(result, context),
            ReportFormat::Markdown => self.markdown(result, context),
        };
        Report { format, text }
    }

    /// Before/After/Reduction table shared by both formats
    pub fn table(&self, result: &BenchmarkResult, bold_reduction: bool) -> String {
        let reduction = result.reduction();
        let emphasize = |cell: String| {
            if bold_reduction {
                format!("**{}**", cell)
            } else {
                cell
            }
        };

        let rows = vec![
            vec![
                "Before ModClean".to_string(),
                format_number(result.before.files as i64),
                format_number(result.before.dirs as i64),
                format_bytes(result.before.size_bytes as i64),
            ],
            vec![
                "After ModClean".to_string(),
                format_number(result.after.files as i64),
                format_number(result.after.dirs as i64),
                format_bytes(result.after.size_bytes as i64),
            ],
            vec![
                "Reduction".to_string(),
                emphasize(format_number(reduction.files)),
                emphasize(format_number(reduction.dirs)),
                emphasize(format_bytes(reduction.size_bytes)),
            ],
        ];

        table::render(&TABLE_HEADER, &rows)
    }

    fn console(&self, result: &BenchmarkResult, context: &ReportContext) -> String {
        let totals = &result.totals;
        let timings = &result.timings;
        let versions = &result.versions;
        let rule = style("-".repeat(context.width.saturating_sub(1).max(1)))
            .dim()
            .to_string();
        let label = |text: &str| style(text).blue().to_string();
        let heading = |text: &str| style(text).green().bold().to_string();

        let lines = vec![
            format!("{}\n", self.table(result, false)),
            heading("Full Statistics"),
            format!("{}{}", label("Files Removed:    "), totals.files),
            format!("{}{}", label("Folders Removed:  "), totals.folders),
            format!("{}{}", label("Empty Folders:    "), totals.empty),
            format!("{}{}", label("Skipped Files:    "), totals.skipped),
            format!(
                "{}{} - {}",
                label("Modules Skipped:  "),
                totals.skipped_modules.len(),
                style(totals.skipped_modules.join(", ")).dim()
            ),
            rule.clone(),
            format!("{}{}", label("Modules:          "), result.config.modules.join(", ")),
            format!("{}{}", label("Patterns:         "), result.config.patterns.join(", ")),
            rule,
            format!("{}{}", label("NPM Version:      "), versions.npm),
            format!("{}{}", label("Node Version:     "), versions.node),
            format!("{}{}", label("ModClean Version: "), versions.modclean),
            String::new(),
            heading("Completion Times"),
            format!("{}{}", label("NPM Install:      "), format_duration(timings.install_ms)),
            format!("{}{}", label("ModClean Run:     "), format_duration(timings.prune_ms)),
            format!("{}{}", label("Total Time:       "), format_duration(timings.total_ms)),
            String::new(),
        ];

        lines.join("\n")
    }

    fn markdown(&self, result: &BenchmarkResult, context: &ReportContext) -> String {
        let config = &result.config;
        let totals = &result.totals;
        let timings = &result.timings;
        let versions = &result.versions;

        let lines = vec![
            "```bash".to_string(),
            config.command_line(),
            "```\n".to_string(),
            format!("{}\n", self.table(result, true)),
            "<details>".to_string(),
            "<summary>Additional Stats</summary>\n".to_string(),
            "<br>\n".to_string(),
            "```".to_string(),
            format!("Modules:         {}", config.modules.join(", ")),
            format!("Patterns:        {}", config.patterns.join(", ")),
            format!("Files Removed:   {}", totals.files),
            format!("Folders Removed: {}", totals.folders),
            format!("Empty Folders:   {}", totals.empty),
            format!("Skipped Files:   {}", totals.skipped),
            format!("Modules Skipped: {}", totals.skipped_modules.len()),
            format!("                 {}", totals.skipped_modules.join(", ")),
            "Times:".to_string(),
            format!("       NPM Install:  {}", format_duration(timings.install_ms)),
            format!("       ModClean Run: {}", format_duration(timings.prune_ms)),
            format!("       Total Time:   {}", format_duration(timings.total_ms)),
            "```\n".to_string(),
            "</details>\n".to_string(),
            format!("> **Author:** {}  ", context.author),
            format!("> **Last Updated:** {}  ", context.date),
            format!("> **Environment:** {}  ", context.environment),
            format!(
                "> **Versions:** ModClean {}, Node {}, NPM {}",
                versions.modclean, versions.node, versions.npm
            ),
        ];

        lines.join("\n")
    }
}

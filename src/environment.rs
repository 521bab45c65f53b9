//! Host environment probing for the report footer
//!
//! Everything here is best-effort: a probe that cannot answer contributes
//! nothing rather than failing the run.

use crate::infra::CommandExecutor;
use crate::report::ReportContext;
use chrono::Local;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// Build the [`ReportContext`] from the clock, the environment and the host
pub fn capture<CE: CommandExecutor>(cmd_executor: &CE) -> ReportContext {
    ReportContext {
        date: today(),
        author: author(),
        environment: describe_host(cmd_executor),
        width: console::Term::stdout().size().1 as usize,
    }
}

/// Current local date as `M/D/YYYY`
pub fn today() -> String {
    Local::now().format("%-m/%-d/%Y").to_string()
}

/// Report author from `USER`/`USERNAME`, or a placeholder
pub fn author() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| "Your Name".to_string())
}

/// Machine model, OS and CPU joined by spaces. Empty if nothing is known.
pub fn describe_host<CE: CommandExecutor>(cmd_executor: &CE) -> String {
    let mut parts = Vec::new();

    if let Some(model) = machine_model(cmd_executor) {
        parts.push(model);
    }

    let os = [System::name(), System::os_version()]
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !os.is_empty() {
        parts.push(os);
    }

    let sys = System::new_with_specifics(
        RefreshKind::new().with_cpu(CpuRefreshKind::everything()),
    );
    if let Some(cpu) = sys.cpus().first() {
        let cpu = format!("{} {}", cpu.vendor_id().trim(), cpu.brand().trim());
        let cpu = cpu.trim();
        if !cpu.is_empty() {
            parts.push(cpu.to_string());
        }
    } else {
        log::warn!("unable to read CPU information");
    }

    parts.join(" ")
}

#[cfg(target_os = "linux")]
fn machine_model<CE: CommandExecutor>(_cmd_executor: &CE) -> Option<String> {
    std::fs::read_to_string("/sys/devices/virtual/dmi/id/product_name")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(target_os = "macos")]
fn machine_model<CE: CommandExecutor>(cmd_executor: &CE) -> Option<String> {
    let output = cmd_executor
        .execute(|cmd| cmd.arg("-n").arg("hw.model"), "sysctl")
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let model = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!model.is_empty()).then_some(model)
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn machine_model<CE: CommandExecutor>(_cmd_executor: &CE) -> Option<String> {
    None
}

//! Shared formatting utilities for sizes, counts, durations and console output

use console::Emoji;

/// Broom emoji for the banner
pub const BROOM: Emoji = Emoji("🧹", "*");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Page emoji for written log files
pub const PAGE: Emoji = Emoji("📄", ">");

const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

/// Format a (possibly negative) byte count as a human-readable size string.
///
/// Units are base-1024; the sign is kept so a size increase shows up as a
/// negative reduction.
///
/// # Examples
///
/// ```
/// use modclean_benchmark::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(8_000_000), "7.63 MB");
/// assert_eq!(format_bytes(-1_048_576), "-1.00 MB");
/// ```
pub fn format_bytes(bytes: i64) -> String {
    const KB: f64 = 1024.0;

    let sign = if bytes < 0 { "-" } else { "" };
    let magnitude = bytes.unsigned_abs();

    if magnitude < 1024 {
        return format!("{}{} B", sign, magnitude);
    }

    let mut value = magnitude as f64 / KB;
    let mut unit = 0;
    while value >= KB && unit < UNITS.len() - 1 {
        value /= KB;
        unit += 1;
    }

    format!("{}{:.2} {}", sign, value, UNITS[unit])
}

/// Format an integer with `,` thousands separators.
///
/// ```
/// use modclean_benchmark::fmt::format_number;
///
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(-4200), "-4,200");
/// ```
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an optional millisecond duration as words.
///
/// Years, months, days and hours appear only when non-zero; minutes and
/// seconds are always present. Months are 30 days and years 365 days.
///
/// ```
/// use modclean_benchmark::fmt::format_duration;
///
/// assert_eq!(format_duration(Some(0)), "0 minutes, 0 seconds");
/// assert_eq!(format_duration(Some(61_000)), "1 minute, 1 second");
/// assert_eq!(format_duration(None), "Not Available");
/// ```
pub fn format_duration(millis: Option<u64>) -> String {
    const SECOND: u64 = 1000;
    const MINUTE: u64 = 60 * SECOND;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;
    const YEAR: u64 = 365 * DAY;

    let Some(mut remaining) = millis else {
        return "Not Available".to_string();
    };

    let mut take = |unit: u64| {
        let n = remaining / unit;
        remaining %= unit;
        n
    };
    let years = take(YEAR);
    let months = take(MONTH);
    let days = take(DAY);
    let hours = take(HOUR);
    let minutes = take(MINUTE);
    let seconds = take(SECOND);

    let mut parts = Vec::new();
    for (value, unit) in [(years, "year"), (months, "month"), (days, "day"), (hours, "hour")] {
        if value > 0 {
            parts.push(plural(value, unit));
        }
    }
    parts.push(plural(minutes, "minute"));
    parts.push(plural(seconds, "second"));

    parts.join(", ")
}

fn plural(value: u64, unit: &str) -> String {
    if value == 1 {
        format!("{} {}", value, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}

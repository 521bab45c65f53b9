//! Padded markdown pipe tables

use console::measure_text_width;

/// Render `header` and `rows` as a left-aligned markdown table with every
/// column padded to its widest cell. Delimiter cells are at least 3 dashes.
pub fn render(header: &[&str], rows: &[Vec<String>]) -> String {
    let columns = header.len();
    let mut widths: Vec<usize> = header
        .iter()
        .map(|h| measure_text_width(h).max(3))
        .collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(header.iter().copied(), &widths));
    lines.push(format!(
        "| {} |",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(" | ")
    ));
    for row in rows {
        lines.push(line(row.iter().map(String::as_str), &widths));
    }

    lines.join("\n")
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(measure_text_width(cell));
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

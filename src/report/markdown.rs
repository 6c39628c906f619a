//! Markdown rendering of a report.

use std::fmt::Write;

use strum::IntoEnumIterator;

use crate::models::{Category, ResultEntry};

use super::Report;

pub(super) fn render(report: &Report) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    // Writing to a String cannot fail
    let _ = writeln!(out, "# Link Validation Report\n");
    let _ = writeln!(out, "Generated: {}\n", report.timestamp);

    let _ = writeln!(out, "## Summary\n");
    let _ = writeln!(out, "| Status | Count |");
    let _ = writeln!(out, "|--------|-------|");
    let _ = writeln!(out, "| ✅ OK | {} |", summary.ok);
    let _ = writeln!(out, "| ❌ Broken | {} |", summary.broken);
    let _ = writeln!(out, "| 🚫 Blocked | {} |", summary.blocked);
    let _ = writeln!(out, "| ⏱️ Timeout | {} |", summary.timeout);
    let _ = writeln!(out, "| **Total** | **{}** |\n", report.total_checked);

    let _ = writeln!(out, "## Broken Links\n");
    if report.results.broken.is_empty() {
        let _ = writeln!(out, "No broken links found.\n");
    } else {
        for category in Category::iter() {
            let entries: Vec<&ResultEntry> = report
                .results
                .broken
                .iter()
                .filter(|e| e.category == category)
                .collect();
            if entries.is_empty() {
                continue;
            }
            let _ = writeln!(out, "### {} ({})\n", category, entries.len());
            let _ = writeln!(out, "| Charity | URL | Problem |");
            let _ = writeln!(out, "|---------|-----|---------|");
            for entry in entries {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} |",
                    cell(&entry.owner_id),
                    cell(&entry.url),
                    cell(&problem(entry))
                );
            }
            out.push('\n');
        }
    }

    if !report.results.blocked.is_empty() {
        let _ = writeln!(out, "## Blocked Domains\n");
        let _ = writeln!(out, "Not checked: these sites reject automated requests.\n");
        let _ = writeln!(out, "| Charity | Category | URL |");
        let _ = writeln!(out, "|---------|----------|-----|");
        for entry in &report.results.blocked {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                cell(&entry.owner_id),
                entry.category,
                cell(&entry.url)
            );
        }
        out.push('\n');
    }

    if !report.results.timeout.is_empty() {
        let _ = writeln!(out, "## Timeouts\n");
        let _ = writeln!(out, "| Charity | Category | URL |");
        let _ = writeln!(out, "|---------|----------|-----|");
        for entry in &report.results.timeout {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                cell(&entry.owner_id),
                entry.category,
                cell(&entry.url)
            );
        }
        out.push('\n');
    }

    out
}

/// Status code if there is one, otherwise the error message.
fn problem(entry: &ResultEntry) -> String {
    match (entry.status, entry.error.as_deref()) {
        (Some(status), _) => status.to_string(),
        (None, Some(error)) => error.to_string(),
        (None, None) => "unknown".to_string(),
    }
}

/// Escapes a value for use inside a Markdown table cell.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\n', '\r'], " ")
}

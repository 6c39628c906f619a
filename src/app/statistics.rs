//! End-of-run summary block.

use std::fmt::Write;

use crate::report::{Report, ReportPaths};

/// Formats the summary printed after all progress lines.
pub fn format_summary(report: &Report, paths: Option<&ReportPaths>, elapsed_seconds: f64) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "Link check summary");
    let _ = writeln!(out, "==================");
    let _ = writeln!(
        out,
        "Checked {} unique URL{} in {:.1}s",
        report.total_checked,
        if report.total_checked == 1 { "" } else { "s" },
        elapsed_seconds
    );
    let _ = writeln!(out, "  ok:      {}", summary.ok);
    let _ = writeln!(out, "  broken:  {}", summary.broken);
    let _ = writeln!(out, "  blocked: {}", summary.blocked);
    let _ = writeln!(out, "  timeout: {}", summary.timeout);
    if let Some(paths) = paths {
        let _ = writeln!(out, "JSON report:     {}", paths.json.display());
        let _ = writeln!(out, "Markdown report: {}", paths.markdown.display());
    }

    out
}

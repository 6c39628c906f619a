//! Report building and output.
//!
//! Results are accumulated per bucket as probes settle, then finalized into a
//! `Report` that is written as JSON (machine-readable) and Markdown
//! (human-readable).

mod markdown;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::{REPORT_JSON_FILE, REPORT_MARKDOWN_FILE};
use crate::models::{Bucket, ResultEntry};

/// Per-bucket result lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Results {
    pub ok: Vec<ResultEntry>,
    pub broken: Vec<ResultEntry>,
    pub blocked: Vec<ResultEntry>,
    pub timeout: Vec<ResultEntry>,
}

impl Results {
    pub fn bucket(&self, bucket: Bucket) -> &[ResultEntry] {
        match bucket {
            Bucket::Ok => &self.ok,
            Bucket::Broken => &self.broken,
            Bucket::Blocked => &self.blocked,
            Bucket::Timeout => &self.timeout,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<ResultEntry> {
        match bucket {
            Bucket::Ok => &mut self.ok,
            Bucket::Broken => &mut self.broken,
            Bucket::Blocked => &mut self.blocked,
            Bucket::Timeout => &mut self.timeout,
        }
    }

    fn len(&self) -> usize {
        self.ok.len() + self.broken.len() + self.blocked.len() + self.timeout.len()
    }
}

/// Per-bucket counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub ok: usize,
    pub broken: usize,
    pub blocked: usize,
    pub timeout: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.ok + self.broken + self.blocked + self.timeout
    }
}

/// Final report of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// RFC 3339 UTC time the report was finalized
    pub timestamp: String,
    /// Number of unique URLs in the report
    pub total_checked: usize,
    pub results: Results,
    pub summary: Summary,
}

impl Report {
    /// Whether any link ended up broken. Blocked and timed-out links do not count.
    pub fn has_broken(&self) -> bool {
        !self.results.broken.is_empty()
    }

    /// Process exit code for this report: 1 if any link is broken, else 0.
    pub fn exit_code(&self) -> i32 {
        if self.has_broken() {
            1
        } else {
            0
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_markdown(&self) -> String {
        markdown::render(self)
    }
}

/// Accumulates results as probes complete.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    results: Results,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files one URL's terminal result under `bucket`.
    pub fn record(&mut self, entry: ResultEntry, bucket: Bucket) {
        self.results.bucket_mut(bucket).push(entry);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finalizes the report. Buckets are sorted by category, then URL, so the
    /// output does not depend on completion order.
    pub fn finish(mut self) -> Report {
        for list in [
            &mut self.results.ok,
            &mut self.results.broken,
            &mut self.results.blocked,
            &mut self.results.timeout,
        ] {
            list.sort_by(|a, b| (a.category, &a.url).cmp(&(b.category, &b.url)));
        }

        let summary = Summary {
            ok: self.results.ok.len(),
            broken: self.results.broken.len(),
            blocked: self.results.blocked.len(),
            timeout: self.results.timeout.len(),
        };

        Report {
            timestamp: chrono::Utc::now().to_rfc3339(),
            total_checked: summary.total(),
            results: self.results,
            summary,
        }
    }
}

/// Where `write_report` put the artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

/// Writes the JSON and Markdown reports into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot be written.
pub fn write_report(report: &Report, dir: &Path) -> Result<ReportPaths> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let json_path = dir.join(REPORT_JSON_FILE);
    let json = report.to_json().context("Failed to serialize report")?;
    std::fs::write(&json_path, json)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    let markdown_path = dir.join(REPORT_MARKDOWN_FILE);
    std::fs::write(&markdown_path, report.to_markdown())
        .with_context(|| format!("Failed to write {}", markdown_path.display()))?;

    log::info!(
        "Reports written to {} and {}",
        json_path.display(),
        markdown_path.display()
    );

    Ok(ReportPaths {
        json: json_path,
        markdown: markdown_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, UrlEntry};
    use tempfile::TempDir;

    fn result(url: &str, category: Category) -> ResultEntry {
        ResultEntry::for_entry(&UrlEntry::new(url, category, "12-3456789"))
    }

    fn sample_report() -> Report {
        let mut builder = ReportBuilder::new();
        builder.record(
            result("https://ok.org", Category::CharityWebsite).with_status(200),
            Bucket::Ok,
        );
        builder.record(
            result("https://gone.org", Category::DonationUrl).with_status(404),
            Bucket::Broken,
        );
        builder.record(
            result("https://www.guidestar.org/p/1", Category::CandidUrl)
                .with_reason("blocked domain"),
            Bucket::Blocked,
        );
        builder.record(
            result("https://slow.org", Category::CitationUrl).with_error("timeout"),
            Bucket::Timeout,
        );
        builder.finish()
    }

    #[test]
    fn test_summary_matches_buckets() {
        let report = sample_report();

        assert_eq!(report.summary.ok, report.results.ok.len());
        assert_eq!(report.summary.broken, report.results.broken.len());
        assert_eq!(report.summary.blocked, report.results.blocked.len());
        assert_eq!(report.summary.timeout, report.results.timeout.len());
        assert_eq!(report.summary.total(), report.total_checked);
        assert_eq!(report.total_checked, 4);
    }

    #[test]
    fn test_exit_code_only_counts_broken() {
        let report = sample_report();
        assert!(report.has_broken());
        assert_eq!(report.exit_code(), 1);

        let mut builder = ReportBuilder::new();
        builder.record(
            result("https://slow.org", Category::CitationUrl).with_error("timeout"),
            Bucket::Timeout,
        );
        builder.record(
            result("https://x.com/a", Category::AttributionUrl).with_reason("blocked domain"),
            Bucket::Blocked,
        );
        let report = builder.finish();
        assert!(!report.has_broken());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_finish_sorts_independent_of_completion_order() {
        let mut first = ReportBuilder::new();
        let mut second = ReportBuilder::new();
        let a = result("https://a.org", Category::CharityWebsite).with_status(200);
        let b = result("https://b.org", Category::CharityWebsite).with_status(200);

        first.record(a.clone(), Bucket::Ok);
        first.record(b.clone(), Bucket::Ok);
        second.record(b, Bucket::Ok);
        second.record(a, Bucket::Ok);

        assert_eq!(first.finish().results, second.finish().results);
    }

    #[test]
    fn test_json_shape() {
        let report = sample_report();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert!(json["timestamp"].is_string());
        assert_eq!(json["total_checked"], 4);
        assert_eq!(json["summary"]["broken"], 1);
        assert_eq!(json["results"]["broken"][0]["status"], 404);
        assert_eq!(json["results"]["blocked"][0]["reason"], "blocked domain");
        assert_eq!(json["results"]["timeout"][0]["error"], "timeout");
        assert_eq!(json["results"]["ok"][0]["category"], "charity_website");
    }

    #[test]
    fn test_write_report_creates_both_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested").join("reports");

        let paths = write_report(&sample_report(), &out).unwrap();

        assert_eq!(paths.json, out.join("link-report.json"));
        assert_eq!(paths.markdown, out.join("link-report.md"));
        let json = std::fs::read_to_string(&paths.json).unwrap();
        assert!(json.contains("\"total_checked\": 4"));
        let markdown = std::fs::read_to_string(&paths.markdown).unwrap();
        assert!(markdown.starts_with("# Link Validation Report"));
    }
}

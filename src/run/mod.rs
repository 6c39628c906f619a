//! Top-level run: load records, check links, write the report.

mod task;

pub use task::{classify, Checker, BLOCKED_REASON};

use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;
use crate::extract::{extract_urls, load_records};
use crate::fetch::HttpProber;
use crate::report::{write_report, Report, ReportPaths};

/// Results of a link-check run.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// The report that was written
    pub report: Report,
    /// Where the JSON and Markdown artifacts were written
    pub paths: ReportPaths,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

impl CheckReport {
    /// Process exit code for this run: 1 when any link is broken, otherwise 0.
    pub fn exit_code(&self) -> i32 {
        self.report.exit_code()
    }
}

/// Runs a link check with the provided configuration.
///
/// Reads every `*.json` record under `config.data_dir`, extracts URLs for the
/// selected categories, probes each unique URL once and writes
/// `link-report.json` and `link-report.md` into `config.output_dir`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be read, the HTTP client
/// cannot be built, or the report files cannot be written. Individual link
/// failures are never errors; they end up in the report.
///
/// # Example
///
/// ```no_run
/// use charity_link_check::{run_check, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     data_dir: PathBuf::from("data/charities"),
///     ..Default::default()
/// };
/// let outcome = run_check(config).await?;
/// println!("{} broken links", outcome.report.summary.broken);
/// # Ok(())
/// # }
/// ```
pub async fn run_check(config: Config) -> Result<CheckReport> {
    let start = Instant::now();

    let records = load_records(&config.data_dir)
        .with_context(|| format!("Failed to load records from {}", config.data_dir.display()))?;
    let entries = extract_urls(&records, &config.categories);
    info!(
        "Loaded {} records: {} URLs extracted",
        records.len(),
        entries.len()
    );

    let prober = HttpProber::from_config(&config).context("Failed to initialize HTTP client")?;
    let checker = Checker::new(prober, &config);
    // check() collapses duplicate URLs
    let report = checker.check(entries).await;

    let paths = write_report(&report, &config.output_dir).context("Failed to write report")?;

    Ok(CheckReport {
        report,
        paths,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

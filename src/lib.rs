//! charity_link_check library: link validation for charity records
//!
//! This library reads charity records (JSON files), extracts every outbound
//! URL they reference, checks each unique URL over HTTP under a global and a
//! per-domain concurrency limit, and writes a categorized report in JSON and
//! Markdown.
//!
//! # Example
//!
//! ```no_run
//! use charity_link_check::{run_check, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     data_dir: std::path::PathBuf::from("data/charities"),
//!     output_dir: std::path::PathBuf::from("reports"),
//!     ..Default::default()
//! };
//!
//! let outcome = run_check(config).await?;
//! println!("Checked {} URLs: {} broken",
//!          outcome.report.total_checked, outcome.report.summary.broken);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod config;
pub mod domain;
pub mod error_handling;
pub mod extract;
pub mod fetch;
pub mod initialization;
pub mod limiter;
pub mod models;
pub mod report;
mod run;
pub mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use fetch::{HttpProber, Probe, ProbeOutcome};
pub use models::{Bucket, Category, ResultEntry, UrlEntry};
pub use report::{Report, ReportPaths};
pub use run::{classify, run_check, CheckReport, Checker, BLOCKED_REASON};

/// Exit code for a run that could not complete (bad input, I/O failure).
pub const EXIT_FATAL: i32 = 2;

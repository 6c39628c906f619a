//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use strum::IntoEnumIterator;

use crate::config::constants::{
    BLOCKED_DOMAINS, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT, DOMAIN_DELAYS, GLOBAL_CONCURRENCY,
    HEAD_TIMEOUT, PER_DOMAIN_CONCURRENCY, RETRY_BACKOFF_UNIT, RETRY_MAX_RETRIES,
};
use crate::models::{Bucket, Category, ResultEntry};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Called once for every URL as soon as its outcome is known.
pub type ProgressCallback = Option<Arc<dyn Fn(&ResultEntry, Bucket) + Send + Sync>>;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "charity_link_check",
    about = "Checks external links referenced by charity records"
)]
pub struct Opt {
    /// Link categories to check (comma-separated). Defaults to all categories.
    #[arg(long = "category", value_enum, value_delimiter = ',')]
    pub categories: Vec<Category>,

    /// GET fallback timeout in milliseconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Directory containing one JSON file per charity
    #[arg(long, default_value = "data/charities")]
    pub data_dir: PathBuf,

    /// Directory the JSON and Markdown reports are written to
    #[arg(long, default_value = "reports")]
    pub output_dir: PathBuf,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use charity_link_check::{Category, Config};
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("data/charities"),
///     categories: vec![Category::CharityWebsite, Category::DonationUrl],
///     ..Default::default()
/// };
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory containing one JSON file per charity
    pub data_dir: PathBuf,

    /// Directory the reports are written to
    pub output_dir: PathBuf,

    /// Categories to extract and check
    pub categories: Vec<Category>,

    /// GET fallback timeout
    pub timeout: Duration,

    /// HEAD timeout
    pub head_timeout: Duration,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Maximum probes in flight across all domains
    pub global_concurrency: usize,

    /// Maximum probes in flight per domain
    pub per_domain_concurrency: usize,

    /// Domains that are never probed (exact or dot-suffix match)
    pub blocked_domains: Vec<String>,

    /// Minimum spacing between requests per domain (exact or dot-suffix match)
    pub domain_delays: Vec<(String, Duration)>,

    /// Retries after the first attempt on 429/503
    pub retry_max_retries: usize,

    /// Backoff unit for retries
    pub retry_backoff_unit: Duration,

    /// Per-URL progress callback
    pub progress_callback: ProgressCallback,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/charities"),
            output_dir: PathBuf::from("reports"),
            categories: Category::iter().collect(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            head_timeout: HEAD_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            global_concurrency: GLOBAL_CONCURRENCY,
            per_domain_concurrency: PER_DOMAIN_CONCURRENCY,
            blocked_domains: BLOCKED_DOMAINS.iter().map(|d| d.to_string()).collect(),
            domain_delays: DOMAIN_DELAYS
                .iter()
                .map(|(domain, delay)| (domain.to_string(), *delay))
                .collect(),
            retry_max_retries: RETRY_MAX_RETRIES,
            retry_backoff_unit: RETRY_BACKOFF_UNIT,
            progress_callback: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &self.data_dir)
            .field("output_dir", &self.output_dir)
            .field("categories", &self.categories)
            .field("timeout", &self.timeout)
            .field("head_timeout", &self.head_timeout)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("global_concurrency", &self.global_concurrency)
            .field("per_domain_concurrency", &self.per_domain_concurrency)
            .field("blocked_domains", &self.blocked_domains)
            .field("domain_delays", &self.domain_delays)
            .field("retry_max_retries", &self.retry_max_retries)
            .field("retry_backoff_unit", &self.retry_backoff_unit)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        let mut categories = opt.categories;
        if categories.is_empty() {
            categories = Category::iter().collect();
        }
        categories.sort();
        categories.dedup();

        Self {
            data_dir: opt.data_dir,
            output_dir: opt.output_dir,
            categories,
            timeout: Duration::from_millis(opt.timeout),
            user_agent: opt.user_agent,
            log_level: opt.log_level,
            log_format: opt.log_format,
            ..Default::default()
        }
    }
}

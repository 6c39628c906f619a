//! Configuration constants.
//!
//! This module defines the constants used throughout the checker: timeouts,
//! concurrency limits, retry parameters and the domain policy tables.

use std::time::Duration;

/// Maximum number of probes in flight across all domains
pub const GLOBAL_CONCURRENCY: usize = 20;
/// Maximum number of probes in flight against a single domain
pub const PER_DOMAIN_CONCURRENCY: usize = 2;

/// Timeout for the initial HEAD request.
/// Kept short and independent of `--timeout`, which only applies to the GET fallback.
pub const HEAD_TIMEOUT: Duration = Duration::from_secs(5);
/// Default GET fallback timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

// Redirect handling
/// Maximum number of redirect hops to follow before giving up
pub const MAX_REDIRECT_HOPS: usize = 5;

// Retry strategy
/// Number of retries after the first attempt (3 attempts total)
pub const RETRY_MAX_RETRIES: usize = 2;
/// Backoff unit. Attempt `n` (starting at 0) waits `2^(n+1)` units before retrying.
pub const RETRY_BACKOFF_UNIT: Duration = Duration::from_secs(1);

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_METHOD_NOT_ALLOWED: u16 = 405;
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
pub const HTTP_STATUS_SERVICE_UNAVAILABLE: u16 = 503;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Domains that are never probed.
///
/// These sites reject automated requests outright (login walls, bot challenges),
/// so probing them only produces false "broken" results. Subdomains match too.
pub const BLOCKED_DOMAINS: &[&str] = &[
    "guidestar.org",
    "facebook.com",
    "instagram.com",
    "linkedin.com",
    "twitter.com",
    "x.com",
    "tiktok.com",
];

/// Minimum spacing between requests to slow or bot-sensitive domains.
/// Unlisted domains have no spacing. Subdomains match too.
pub const DOMAIN_DELAYS: &[(&str, Duration)] = &[
    ("charitynavigator.org", Duration::from_millis(1000)),
    ("candid.org", Duration::from_millis(1000)),
    ("give.org", Duration::from_millis(500)),
    ("propublica.org", Duration::from_millis(500)),
    ("irs.gov", Duration::from_millis(500)),
];

// Output artifacts
/// File name of the machine-readable report
pub const REPORT_JSON_FILE: &str = "link-report.json";
/// File name of the human-readable report
pub const REPORT_MARKDOWN_FILE: &str = "link-report.md";

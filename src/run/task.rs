//! Checking a batch of URLs.
//!
//! All probes run as futures on the calling task. Admission is controlled by
//! the global gate and the per-domain limiter; completion order is arbitrary.

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info};

use crate::config::{Config, ProgressCallback};
use crate::domain::{hostname, is_blocked_host};
use crate::error_handling::ProbeError;
use crate::extract::dedupe;
use crate::fetch::{Probe, ProbeOutcome};
use crate::limiter::ProbeLimits;
use crate::models::{Bucket, ResultEntry, UrlEntry};
use crate::report::{Report, ReportBuilder};
use crate::utils::RetryPolicy;

/// Reason recorded for URLs on the denylist.
pub const BLOCKED_REASON: &str = "blocked domain";

/// Checks URLs with a given prober under the configured limits.
pub struct Checker<P> {
    prober: P,
    limits: ProbeLimits,
    retry: RetryPolicy,
    blocked_domains: Vec<String>,
    progress: ProgressCallback,
}

impl<P: Probe> Checker<P> {
    pub fn new(prober: P, config: &Config) -> Self {
        Self {
            prober,
            limits: ProbeLimits::from_config(config),
            retry: RetryPolicy::from_config(config),
            blocked_domains: config.blocked_domains.clone(),
            progress: config.progress_callback.clone(),
        }
    }

    pub fn limits(&self) -> &ProbeLimits {
        &self.limits
    }

    /// Checks every unique URL in `entries` and builds the report.
    ///
    /// Duplicate URLs are collapsed first (first occurrence wins). Blocked
    /// URLs are recorded without touching the network.
    pub async fn check(&self, entries: Vec<UrlEntry>) -> Report {
        let entries = dedupe(entries);
        let mut builder = ReportBuilder::new();
        let mut pending = FuturesUnordered::new();

        for entry in entries {
            let host = hostname(&entry.url);
            if is_blocked_host(&host, &self.blocked_domains) {
                let result = ResultEntry::for_entry(&entry).with_reason(BLOCKED_REASON);
                self.settle(&mut builder, result, Bucket::Blocked);
                continue;
            }
            pending.push(self.check_one(entry, host));
        }

        info!(
            "Checking {} URLs ({} blocked, not checked)",
            pending.len(),
            builder.len()
        );

        while let Some((result, bucket)) = pending.next().await {
            self.settle(&mut builder, result, bucket);
        }

        builder.finish()
    }

    async fn check_one(&self, entry: UrlEntry, host: String) -> (ResultEntry, Bucket) {
        let retried = self.retry.run(|| self.attempt(&entry.url, &host)).await;
        if retried.attempts > 1 {
            debug!("{} settled after {} attempts", entry.url, retried.attempts);
        }
        classify(&entry, retried.outcome)
    }

    /// One probe, holding both gates for exactly the duration of the request.
    async fn attempt(&self, url: &str, host: &str) -> ProbeOutcome {
        let _permit = match self.limits.acquire(host).await {
            Ok(permit) => permit,
            Err(e) => return ProbeOutcome::Failed(ProbeError::Request(e.to_string())),
        };
        self.prober.probe(url).await
    }

    fn settle(&self, builder: &mut ReportBuilder, result: ResultEntry, bucket: Bucket) {
        debug!("{} -> {}", result.url, bucket.as_str());
        if let Some(callback) = &self.progress {
            callback(&result, bucket);
        }
        builder.record(result, bucket);
    }
}

/// Maps a final probe outcome to a report entry and bucket.
pub fn classify(entry: &UrlEntry, outcome: ProbeOutcome) -> (ResultEntry, Bucket) {
    let result = ResultEntry::for_entry(entry);
    match outcome {
        ProbeOutcome::Status(status) if (200..400).contains(&status) => {
            (result.with_status(status), Bucket::Ok)
        }
        ProbeOutcome::Status(status) => (result.with_status(status), Bucket::Broken),
        ProbeOutcome::Timeout => (result.with_error("timeout"), Bucket::Timeout),
        ProbeOutcome::Failed(error) => (result.with_error(error.to_string()), Bucket::Broken),
    }
}

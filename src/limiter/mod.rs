//! Admission control for probes.
//!
//! Every network probe must hold two permits: one from the global gate, which
//! caps total in-flight probes, and one from the per-domain limiter. They are
//! always acquired global-first and released domain-first, so two probes can
//! never wait on each other's permits in opposite order.

mod domain;

use std::sync::Arc;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

use crate::config::Config;
use crate::initialization::init_semaphore;

pub use domain::{DomainPermit, DomainRateLimiter};

/// Both permits a probe needs.
///
/// Fields drop in declaration order: the domain slot is returned before the
/// global one.
#[derive(Debug)]
pub struct ProbePermit {
    _domain: DomainPermit,
    _global: OwnedSemaphorePermit,
}

/// Global concurrency gate composed with the per-domain rate limiter.
pub struct ProbeLimits {
    global: Arc<Semaphore>,
    global_capacity: usize,
    domains: DomainRateLimiter,
}

impl ProbeLimits {
    pub fn new(global: usize, domains: DomainRateLimiter) -> Self {
        let global_capacity = global.max(1);
        Self {
            global: init_semaphore(global_capacity),
            global_capacity,
            domains,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.global_concurrency,
            DomainRateLimiter::new(config.per_domain_concurrency, config.domain_delays.clone()),
        )
    }

    /// Waits for a global slot, then for a slot (and spacing) on `domain`.
    ///
    /// # Errors
    ///
    /// Only fails if a semaphore was closed, which never happens during a run.
    pub async fn acquire(&self, domain: &str) -> Result<ProbePermit, AcquireError> {
        let global = Arc::clone(&self.global).acquire_owned().await?;
        let domain = self.domains.acquire(domain).await?;
        Ok(ProbePermit {
            _domain: domain,
            _global: global,
        })
    }

    /// Number of probes currently holding a global slot.
    pub fn in_flight(&self) -> usize {
        self.global_capacity - self.global.available_permits()
    }

    pub fn domains(&self) -> &DomainRateLimiter {
        &self.domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_global_cap_across_domains() {
        let limits = ProbeLimits::new(3, DomainRateLimiter::new(2, Vec::new()));
        let current = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let (limits, current, peak) = (&limits, &current, &peak);

        join_all((0..12).map(|i| async move {
            let domain = format!("site{i}.org");
            let _permit = limits.acquire(&domain).await.unwrap();
            let now = current.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            assert!(limits.in_flight() <= 3);
            tokio::time::sleep(Duration::from_millis(50)).await;
            current.fetch_sub(1, Ordering::SeqCst);
        }))
        .await;

        assert_eq!(peak.load(Ordering::SeqCst), 3);
        assert_eq!(limits.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permit_releases_both_gates() {
        let limits = ProbeLimits::new(5, DomainRateLimiter::new(2, Vec::new()));

        let permit = limits.acquire("example.org").await.unwrap();
        assert_eq!(limits.in_flight(), 1);
        assert_eq!(limits.domains().in_flight("example.org"), 1);

        drop(permit);
        assert_eq!(limits.in_flight(), 0);
        assert_eq!(limits.domains().in_flight("example.org"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_domain_wait_holds_global_slot() {
        // A probe queued on a busy domain keeps its global slot; other domains
        // still make progress with the remaining ones.
        let limits = ProbeLimits::new(3, DomainRateLimiter::new(1, Vec::new()));
        let _busy = limits.acquire("busy.org").await.unwrap();

        let waiting = limits.acquire("busy.org");
        tokio::pin!(waiting);
        assert!(
            tokio::time::timeout(Duration::from_millis(10), &mut waiting)
                .await
                .is_err()
        );

        let other = tokio::time::timeout(Duration::from_millis(10), limits.acquire("free.org")).await;
        assert!(other.is_ok());
    }
}

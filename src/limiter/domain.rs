//! Per-domain concurrency cap and request spacing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;

use crate::domain::matches_domain;

/// Bookkeeping for one domain. Created on first use and kept for the run.
struct DomainQueue {
    /// FIFO-fair slots; at most `per_domain` probes in flight
    permits: Arc<Semaphore>,
    /// Minimum spacing between dispatched requests
    delay: Duration,
    /// When the most recent request was (or will be) dispatched
    last_dispatch: Mutex<Option<Instant>>,
}

impl DomainQueue {
    /// Reserves the next dispatch time, at least `delay` after the previous one.
    ///
    /// The reservation happens under the lock and before any await, so two
    /// callers can never claim the same slot.
    fn reserve_slot(&self) -> Instant {
        let now = Instant::now();
        let mut last = self
            .last_dispatch
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let at = match *last {
            Some(prev) => (prev + self.delay).max(now),
            None => now,
        };
        *last = Some(at);
        at
    }
}

/// Holds one of a domain's slots. The slot is released when this is dropped.
#[derive(Debug)]
pub struct DomainPermit {
    _permit: OwnedSemaphorePermit,
}

/// Per-domain rate limiter.
///
/// Enforces two independent constraints on each domain:
/// - at most `per_domain` in-flight probes (further callers wait in FIFO order)
/// - a minimum delay between consecutive requests, for domains listed in `delays`
///
/// Performs no I/O itself.
pub struct DomainRateLimiter {
    per_domain: usize,
    delays: Vec<(String, Duration)>,
    queues: Mutex<HashMap<String, Arc<DomainQueue>>>,
}

impl DomainRateLimiter {
    pub fn new(per_domain: usize, delays: Vec<(String, Duration)>) -> Self {
        Self {
            per_domain: per_domain.max(1),
            delays,
            queues: Mutex::new(HashMap::new()),
        }
    }

    /// Configured spacing for `domain` (exact or dot-suffix match), zero if unlisted.
    pub fn delay_for(&self, domain: &str) -> Duration {
        self.delays
            .iter()
            .find(|(listed, _)| matches_domain(domain, listed))
            .map(|(_, delay)| *delay)
            .unwrap_or(Duration::ZERO)
    }

    fn queue(&self, domain: &str) -> Arc<DomainQueue> {
        let mut queues = self
            .queues
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(queues.entry(domain.to_string()).or_insert_with(|| {
            Arc::new(DomainQueue {
                permits: Arc::new(Semaphore::new(self.per_domain)),
                delay: self.delay_for(domain),
                last_dispatch: Mutex::new(None),
            })
        }))
    }

    /// Waits for a slot on `domain`, then for the domain's spacing to elapse.
    ///
    /// # Errors
    ///
    /// Only fails if the underlying semaphore was closed, which this limiter never does.
    pub async fn acquire(&self, domain: &str) -> Result<DomainPermit, AcquireError> {
        let queue = self.queue(domain);
        let permit = Arc::clone(&queue.permits).acquire_owned().await?;

        if !queue.delay.is_zero() {
            let at = queue.reserve_slot();
            if at > Instant::now() {
                log::debug!(
                    "Spacing request to {} by {}ms",
                    domain,
                    (at - Instant::now()).as_millis()
                );
                tokio::time::sleep_until(at).await;
            }
        }

        Ok(DomainPermit { _permit: permit })
    }

    /// Number of probes currently holding a slot on `domain`.
    pub fn in_flight(&self, domain: &str) -> usize {
        let queues = self
            .queues
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        queues
            .get(domain)
            .map(|q| self.per_domain - q.permits.available_permits())
            .unwrap_or(0)
    }
}

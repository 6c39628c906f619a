//! Retry policy for transient server responses.

use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;

use crate::config::{Config, RETRY_BACKOFF_UNIT, RETRY_MAX_RETRIES};
use crate::fetch::ProbeOutcome;

/// Result of running a probe under the retry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetriedOutcome {
    /// Outcome of the last attempt
    pub outcome: ProbeOutcome,
    /// Total attempts made, including the first one
    pub attempts: u32,
}

/// Retries a probe while it answers 429 or 503.
///
/// Attempt `n` (starting at 0) is followed by a `2^(n+1)` unit wait, so with the
/// default one-second unit the waits are 2s then 4s. Every other outcome,
/// including timeouts and transport errors, is returned immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: RETRY_MAX_RETRIES,
            unit: RETRY_BACKOFF_UNIT,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.retry_max_retries,
            unit: config.retry_backoff_unit,
        }
    }

    /// Backoff delays between attempts: 2, 4, 8, ... units, `max_retries` of them.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        // from_millis(2) yields 2·factor, 4·factor, 8·factor ... milliseconds
        let unit_ms = u64::try_from(self.unit.as_millis()).unwrap_or(u64::MAX);
        ExponentialBackoff::from_millis(2)
            .factor(unit_ms)
            .take(self.max_retries)
    }

    /// Runs `attempt` until it gives a non-transient outcome or retries run out.
    pub async fn run<F, Fut>(&self, mut attempt: F) -> RetriedOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ProbeOutcome>,
    {
        let attempts = AtomicU32::new(0);

        let result = RetryIf::spawn(
            self.delays(),
            || {
                attempts.fetch_add(1, Ordering::SeqCst);
                let fut = attempt();
                async move {
                    let outcome = fut.await;
                    if outcome.is_transient() {
                        Err(outcome)
                    } else {
                        Ok(outcome)
                    }
                }
            },
            |outcome: &ProbeOutcome| {
                log::debug!("Transient response {:?}, backing off", outcome);
                true
            },
        )
        .await;

        let outcome = match result {
            Ok(outcome) | Err(outcome) => outcome,
        };
        RetriedOutcome {
            outcome,
            attempts: attempts.load(Ordering::SeqCst),
        }
    }
}

//! HTTP probing.
//!
//! A probe issues a HEAD request with a short fixed timeout and falls back to
//! GET (with the run's configurable timeout) when the HEAD times out or the
//! server answers `405 Method Not Allowed`. Redirects are followed manually
//! up to `MAX_REDIRECT_HOPS`.

mod redirects;

use std::future::Future;
use std::time::Duration;

use reqwest::{Method, Url};

use crate::config::{
    Config, HTTP_STATUS_METHOD_NOT_ALLOWED, HTTP_STATUS_SERVICE_UNAVAILABLE,
    HTTP_STATUS_TOO_MANY_REQUESTS, MAX_REDIRECT_HOPS,
};
use crate::error_handling::{InitializationError, ProbeError};
use crate::initialization::init_client;

pub use redirects::{is_redirect_status, send_following_redirects};

/// Outcome of a single probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with this (final, non-redirect) status code.
    Status(u16),
    /// The request timed out.
    Timeout,
    /// The request failed without a usable status.
    Failed(ProbeError),
}

impl ProbeOutcome {
    /// True for statuses in `[200, 400)`.
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Status(status) if (200..400).contains(status))
    }

    /// True for the transient server signals the retry policy acts on (429, 503).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProbeOutcome::Status(HTTP_STATUS_TOO_MANY_REQUESTS)
                | ProbeOutcome::Status(HTTP_STATUS_SERVICE_UNAVAILABLE)
        )
    }
}

/// Something that can check one URL.
///
/// `HttpProber` is the real implementation; the seam exists so the
/// orchestration can be driven without a network.
pub trait Probe {
    fn probe(&self, url: &str) -> impl Future<Output = ProbeOutcome> + Send;
}

/// Probes URLs over HTTP with HEAD-then-GET semantics.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    head_timeout: Duration,
    get_timeout: Duration,
    max_hops: usize,
}

impl HttpProber {
    /// The HEAD budget is capped at `get_timeout`, so a HEAD never outlasts a GET.
    pub fn new(client: reqwest::Client, head_timeout: Duration, get_timeout: Duration) -> Self {
        Self {
            client,
            head_timeout: head_timeout.min(get_timeout),
            get_timeout,
            max_hops: MAX_REDIRECT_HOPS,
        }
    }

    /// Builds a prober with a fresh client configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        Ok(Self::new(client, config.head_timeout, config.timeout))
    }

    async fn send(&self, method: Method, url: Url, timeout: Duration) -> ProbeOutcome {
        send_following_redirects(&self.client, method, url, timeout, self.max_hops).await
    }
}

impl Probe for HttpProber {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        let parsed = match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed,
            _ => return ProbeOutcome::Failed(ProbeError::InvalidUrl(url.to_string())),
        };

        let head = self
            .send(Method::HEAD, parsed.clone(), self.head_timeout)
            .await;
        match head {
            ProbeOutcome::Timeout | ProbeOutcome::Status(HTTP_STATUS_METHOD_NOT_ALLOWED) => {
                log::debug!("HEAD {} gave {:?}, retrying as GET", url, head);
                self.send(Method::GET, parsed, self.get_timeout).await
            }
            other => other,
        }
    }
}

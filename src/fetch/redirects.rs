//! Manual redirect following.
//!
//! The client has automatic redirects disabled so the hop limit and the
//! per-request timeout stay under our control.

use std::time::Duration;

use reqwest::{Method, Url};

use crate::error_handling::ProbeError;

use super::ProbeOutcome;

/// Returns true for status codes that carry a `Location` to follow.
pub fn is_redirect_status(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// Sends `method` to `start`, following redirects up to `max_hops` times.
///
/// Every hop gets the full `timeout`. Relative `Location` headers are resolved
/// against the URL that returned them. A redirect status without a `Location`
/// header is returned as-is.
pub async fn send_following_redirects(
    client: &reqwest::Client,
    method: Method,
    start: Url,
    timeout: Duration,
    max_hops: usize,
) -> ProbeOutcome {
    let mut current = start;
    let mut hops = 0;

    loop {
        let response = match client
            .request(method.clone(), current.clone())
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return ProbeOutcome::Timeout,
            Err(e) => return ProbeOutcome::Failed(ProbeError::from_reqwest(&e)),
        };

        let status = response.status().as_u16();
        if !is_redirect_status(status) {
            return ProbeOutcome::Status(status);
        }

        let Some(location) = response.headers().get(reqwest::header::LOCATION) else {
            log::warn!(
                "Redirect status {} for {} but no Location header",
                status,
                current
            );
            return ProbeOutcome::Status(status);
        };

        if hops >= max_hops {
            return ProbeOutcome::Failed(ProbeError::TooManyRedirects(max_hops));
        }

        let location = match location.to_str() {
            Ok(location) => location,
            Err(_) => {
                return ProbeOutcome::Failed(ProbeError::InvalidRedirect(
                    String::from_utf8_lossy(location.as_bytes()).into_owned(),
                ))
            }
        };
        // join() handles both absolute and relative locations
        let next = match current.join(location) {
            Ok(next) => next,
            Err(_) => {
                return ProbeOutcome::Failed(ProbeError::InvalidRedirect(location.to_string()))
            }
        };

        log::debug!("{} {} -> {} ({})", method, current, next, status);
        current = next;
        hops += 1;
    }
}

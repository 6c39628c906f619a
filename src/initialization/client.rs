//! HTTP client initialization.

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the HTTP client used for probing.
///
/// Redirects are disabled so the prober can follow them itself and enforce
/// its own hop limit. No client-wide timeout is set: HEAD and GET requests
/// carry their own per-request timeouts.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(config.user_agent.clone())
        .build()
}

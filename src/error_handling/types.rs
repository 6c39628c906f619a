//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Reasons a probe failed without producing a usable status code.
///
/// Timeouts are not errors here; they are reported separately so they can be
/// bucketed apart from broken links.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The URL could not be parsed or is not http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The redirect chain was longer than the hop limit.
    #[error("Too many redirects (more than {0} hops)")]
    TooManyRedirects(usize),

    /// A redirect pointed at a location that cannot be resolved.
    #[error("Invalid redirect location: {0}")]
    InvalidRedirect(String),

    /// Transport-level failure (DNS, connect, TLS, protocol).
    #[error("{0}")]
    Request(String),
}

impl ProbeError {
    /// Builds a `Request` error from a reqwest error, keeping the full source chain
    /// so that messages like "dns error" or "certificate" survive into the report.
    pub fn from_reqwest(error: &ReqwestError) -> Self {
        let mut message = error.to_string();
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ProbeError::Request(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_messages() {
        assert_eq!(
            ProbeError::InvalidUrl("not a url".into()).to_string(),
            "Invalid URL: not a url"
        );
        assert_eq!(
            ProbeError::TooManyRedirects(5).to_string(),
            "Too many redirects (more than 5 hops)"
        );
        assert_eq!(
            ProbeError::Request("connection refused".into()).to_string(),
            "connection refused"
        );
    }
}

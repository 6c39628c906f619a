//! Hostname extraction and domain policy matching.
//!
//! Key functions:
//! - `hostname()` - Extracts the host of a URL (empty for invalid URLs)
//! - `matches_domain()` - Exact or dot-suffix match against a policy entry
//! - `is_blocked()` - Checks a URL against the denylist

/// Extracts the hostname from a URL.
///
/// Returns an empty string if the URL cannot be parsed or has no host. Such
/// URLs are still checkable; the prober rejects them with an explicit
/// "Invalid URL" error so they show up in the report.
pub fn hostname(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| h.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Returns true if `host` is `domain` or a subdomain of it.
///
/// `sub.example.org` matches `example.org`; `badexample.org` does not.
pub fn matches_domain(host: &str, domain: &str) -> bool {
    if host.is_empty() || domain.is_empty() {
        return false;
    }
    let host = host.to_ascii_lowercase();
    let domain = domain.to_ascii_lowercase();
    host == domain || host.ends_with(&format!(".{domain}"))
}

/// Returns true if `host` matches any entry of `denylist`.
pub fn is_blocked_host<S: AsRef<str>>(host: &str, denylist: &[S]) -> bool {
    denylist
        .iter()
        .any(|domain| matches_domain(host, domain.as_ref()))
}

/// Returns true if the URL's host matches any entry of `denylist`.
pub fn is_blocked<S: AsRef<str>>(url: &str, denylist: &[S]) -> bool {
    is_blocked_host(&hostname(url), denylist)
}

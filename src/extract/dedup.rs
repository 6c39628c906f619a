//! URL deduplication.

use std::collections::HashSet;

use crate::models::UrlEntry;

/// Collapses `entries` to one entry per distinct URL string.
///
/// The first occurrence wins, so its category and owner are the ones reported.
/// URLs are compared byte-for-byte: `https://a.org` and `https://a.org/` are
/// different URLs here. Callers that want normalization must normalize first.
pub fn dedupe(entries: Vec<UrlEntry>) -> Vec<UrlEntry> {
    let mut seen: HashSet<String> = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.url.clone()))
        .collect()
}

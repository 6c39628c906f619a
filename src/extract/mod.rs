//! URL extraction from charity records.
//!
//! This module provides:
//! - Loading records from the data directory (`load_records`)
//! - Pulling every checkable URL out of the records (`extract_urls`)
//! - Collapsing duplicates (`dedupe`)

mod dedup;
mod records;

use serde_json::Value;

use crate::models::{Category, UrlEntry};

pub use dedup::dedupe;
pub use records::{load_records, CharityRecord};

/// Narrative blocks that may carry citations, in extraction order.
const NARRATIVE_KEYS: &[&str] = &["narrative", "baselineNarrative", "richNarrative"];
/// Keys a citation or attribution object may store its URL under.
const URL_KEYS: &[&str] = &["url", "source_url", "sourceUrl"];

/// Extracts every URL of an enabled category from `records`.
///
/// Entries come out in record order, and within a record in category order
/// (website, donation, rating sites, citations, attributions). Values are
/// taken as-is: malformed URLs are kept so they show up as broken instead of
/// silently disappearing.
pub fn extract_urls(records: &[CharityRecord], categories: &[Category]) -> Vec<UrlEntry> {
    let mut entries = Vec::new();
    for record in records {
        extract_record(record, categories, &mut entries);
    }
    entries
}

fn extract_record(record: &CharityRecord, categories: &[Category], out: &mut Vec<UrlEntry>) {
    let owner = owner_id(record);
    let data = &record.data;
    let enabled = |category: Category| categories.contains(&category);
    let mut push = |url: &str, category: Category| {
        out.push(UrlEntry::new(url, category, owner.clone()));
    };

    let direct = [
        ("website", Category::CharityWebsite),
        ("donationUrl", Category::DonationUrl),
        ("charityNavigatorUrl", Category::CnUrl),
        ("candidUrl", Category::CandidUrl),
        ("bbbUrl", Category::BbbUrl),
    ];
    for (key, category) in direct {
        if enabled(category) {
            if let Some(url) = string_field(data, key) {
                push(url, category);
            }
        }
    }

    if enabled(Category::CitationUrl) {
        for key in NARRATIVE_KEYS {
            let citations = data
                .get(key)
                .and_then(|block| block.get("citations"))
                .and_then(Value::as_array);
            for citation in citations.into_iter().flatten() {
                if let Some(url) = link_value(citation) {
                    push(url, Category::CitationUrl);
                }
            }
        }
    }

    if enabled(Category::AttributionUrl) {
        if let Some(attributions) = data.get("sourceAttribution").and_then(Value::as_object) {
            let mut keyed: Vec<(&String, &Value)> = attributions.iter().collect();
            keyed.sort_by(|a, b| a.0.cmp(b.0));
            for (_, value) in keyed {
                if let Some(url) = link_value(value) {
                    push(url, Category::AttributionUrl);
                }
            }
        }
    }
}

/// The record's identifier: `ein`, then `id`, then the file it came from.
fn owner_id(record: &CharityRecord) -> String {
    ["ein", "id"]
        .iter()
        .find_map(|key| match record.data.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| record.source.clone())
}

fn string_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// A link given either as a bare string or as an object with a URL field.
fn link_value(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
        Value::Object(_) => URL_KEYS.iter().find_map(|key| string_field(value, key)),
        _ => None,
    }
}

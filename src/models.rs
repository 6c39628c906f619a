//! Shared data types: link categories, extracted URLs and per-URL results.

use clap::ValueEnum;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;

/// Kind of link a URL was extracted from.
///
/// The snake_case names are used both for `--category` on the command line and
/// in serialized reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, EnumIterMacro,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// The charity's own website
    #[value(name = "charity_website")]
    CharityWebsite,
    /// Donation page
    #[value(name = "donation_url")]
    DonationUrl,
    /// Charity Navigator profile
    #[value(name = "cn_url")]
    CnUrl,
    /// Candid (GuideStar) profile
    #[value(name = "candid_url")]
    CandidUrl,
    /// BBB Wise Giving Alliance review
    #[value(name = "bbb_url")]
    BbbUrl,
    /// Citation inside a narrative block
    #[value(name = "citation_url")]
    CitationUrl,
    /// Source attribution link
    #[value(name = "attribution_url")]
    AttributionUrl,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CharityWebsite => "charity_website",
            Category::DonationUrl => "donation_url",
            Category::CnUrl => "cn_url",
            Category::CandidUrl => "candid_url",
            Category::BbbUrl => "bbb_url",
            Category::CitationUrl => "citation_url",
            Category::AttributionUrl => "attribution_url",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL found in a charity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlEntry {
    pub url: String,
    pub category: Category,
    pub owner_id: String,
}

impl UrlEntry {
    pub fn new(url: impl Into<String>, category: Category, owner_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            category,
            owner_id: owner_id.into(),
        }
    }
}

/// Report bucket a checked URL ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Ok,
    Broken,
    Blocked,
    Timeout,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Ok => "ok",
            Bucket::Broken => "broken",
            Bucket::Blocked => "blocked",
            Bucket::Timeout => "timeout",
        }
    }
}

/// Terminal outcome for one unique URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    pub url: String,
    pub category: Category,
    pub owner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ResultEntry {
    /// Starts a result for `entry` with no status, error or reason.
    pub fn for_entry(entry: &UrlEntry) -> Self {
        Self {
            url: entry.url.clone(),
            category: entry.category,
            owner_id: entry.owner_id.clone(),
            status: None,
            error: None,
            reason: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

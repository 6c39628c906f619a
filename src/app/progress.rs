//! Per-URL progress lines.

use std::sync::Arc;

use colored::*;

use crate::config::ProgressCallback;
use crate::models::{Bucket, ResultEntry};

/// Formats the console line for one settled URL.
///
/// ```text
/// ✓ 200 https://example.org
/// ✗ 404 https://example.org/gone
/// ✗ Invalid URL: not a url
/// ⏱ timeout https://slow.example
/// ⊘ blocked https://www.guidestar.org/profile/1
/// ```
pub fn format_progress(entry: &ResultEntry, bucket: Bucket) -> String {
    match bucket {
        Bucket::Ok => format!(
            "{} {} {}",
            "✓".green(),
            entry.status.map(|s| s.to_string()).unwrap_or_default(),
            entry.url
        ),
        Bucket::Broken => {
            let detail = match (entry.status, entry.error.as_deref()) {
                (Some(status), _) => status.to_string(),
                (None, Some(error)) => error.to_string(),
                (None, None) => "broken".to_string(),
            };
            format!("{} {} {}", "✗".red(), detail.red(), entry.url)
        }
        Bucket::Timeout => format!("{} {} {}", "⏱".yellow(), "timeout".yellow(), entry.url),
        Bucket::Blocked => format!("{} {} {}", "⊘".blue(), "blocked".blue(), entry.url),
    }
}

/// A progress callback that prints one line per URL to stdout.
pub fn stdout_progress() -> ProgressCallback {
    Some(Arc::new(|entry: &ResultEntry, bucket: Bucket| {
        println!("{}", format_progress(entry, bucket));
    }))
}

//! Loading charity records from the data directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde_json::Value;

/// One charity record as produced by the data pipeline.
///
/// The record shape is owned by the pipeline, so it is kept as raw JSON and
/// only the fields the extractor knows about are ever read.
#[derive(Debug, Clone)]
pub struct CharityRecord {
    /// File stem the record was loaded from, used when the record carries no ID
    pub source: String,
    /// Parsed JSON document
    pub data: Value,
}

impl CharityRecord {
    pub fn new(source: impl Into<String>, data: Value) -> Self {
        Self {
            source: source.into(),
            data,
        }
    }
}

/// Loads every `*.json` file in `dir`, in file-name order.
///
/// Files that cannot be read or parsed are logged and skipped.
///
/// # Errors
///
/// Returns an error if the directory itself cannot be listed.
pub fn load_records(dir: &Path) -> Result<Vec<CharityRecord>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read data directory {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        match read_record(&path) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping {}: {e:#}", path.display()),
        }
    }

    debug!("Loaded {} records from {}", records.len(), dir.display());
    Ok(records)
}

fn read_record(path: &Path) -> Result<CharityRecord> {
    let contents = std::fs::read_to_string(path).context("Failed to read file")?;
    let data: Value = serde_json::from_str(&contents).context("Failed to parse JSON")?;
    let source = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(CharityRecord::new(source, data))
}

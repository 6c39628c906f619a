// Shared test helpers for record fixtures and configuration.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::Path;
use std::time::Duration;

use serde_json::Value;

use charity_link_check::{Category, Config, LogFormat, LogLevel};

/// Writes one charity record as `<name>.json` into `dir`.
#[allow(dead_code)] // Used by other test files
pub fn write_record(dir: &Path, name: &str, record: &Value) {
    let path = dir.join(format!("{name}.json"));
    std::fs::write(&path, record.to_string()).expect("Failed to write record file");
}

/// Creates a Config suited to tests: short timeouts, one category, millisecond retry backoff.
#[allow(dead_code)] // Used by other test files
pub fn create_test_config(data_dir: &Path, output_dir: &Path) -> Config {
    Config {
        data_dir: data_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        categories: vec![Category::CharityWebsite],
        timeout: Duration::from_millis(300),
        head_timeout: Duration::from_millis(100),
        user_agent: "charity_link_check_test/1.0".to_string(),
        log_level: LogLevel::Error, // Reduce noise in tests
        log_format: LogFormat::Plain,
        retry_backoff_unit: Duration::from_millis(10),
        ..Default::default()
    }
}

//! Error types.
//!
//! Only initialization failures and orchestration failures (reported through
//! `anyhow`) are fatal. Probe failures are values: they end up in the report.

mod types;

// Re-export public API
pub use types::{InitializationError, ProbeError};

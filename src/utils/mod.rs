//! Utility functions for URL processing.
//!
//! This module provides:
//! - Retry policy for transient server responses

mod retry;

pub use retry::{RetriedOutcome, RetryPolicy};

//! Console output used by the command-line binary.

pub mod progress;
pub mod statistics;

// Re-export public API
pub use progress::{format_progress, stdout_progress};
pub use statistics::format_summary;

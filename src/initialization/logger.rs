//! Logger initialization.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Dependency modules that are capped at info unless `RUST_LOG` says otherwise.
const NOISY_DEPENDENCIES: &[&str] = &["reqwest", "hyper", "hyper_util"];

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors) and JSON formats for structured logging.
///
/// When `RUST_LOG` is set its directives are kept as-is (so
/// `RUST_LOG=reqwest=debug` works for dependency debugging); otherwise
/// `level` is the default and noisy dependencies are capped at info. Either
/// way `level` applies to this crate.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::new();
    let rust_log = std::env::var("RUST_LOG").ok();
    apply_filters(&mut builder, level, rust_log.as_deref());

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init() so a second initialization (tests) is an error rather than a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn apply_filters(builder: &mut env_logger::Builder, level: LevelFilter, rust_log: Option<&str>) {
    match rust_log.filter(|spec| !spec.trim().is_empty()) {
        Some(spec) => {
            builder.parse_filters(spec);
        }
        None => {
            builder.filter_level(level);
            for module in NOISY_DEPENDENCIES {
                builder.filter_module(module, LevelFilter::Info);
            }
        }
    }
    builder.filter_module("charity_link_check", level);
}

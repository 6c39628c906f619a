//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `charity_link_check` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Progress and summary output
//! - Mapping the outcome to an exit code
//!
//! All core functionality is implemented in the library crate.

use std::process;

use clap::Parser;

use charity_link_check::app::{format_summary, stdout_progress};
use charity_link_check::initialization::init_logger_with;
use charity_link_check::{run_check, Config, Opt, EXIT_FATAL};

#[tokio::main]
async fn main() {
    // clap exits with status 2 on usage errors
    let opt = Opt::parse();

    let mut config = Config::from(opt);
    if let Err(e) = init_logger_with(config.log_level.clone().into(), config.log_format.clone()) {
        eprintln!("charity_link_check error: Failed to initialize logger: {e}");
        process::exit(EXIT_FATAL);
    }
    config.progress_callback = stdout_progress();

    match run_check(config).await {
        Ok(outcome) => {
            print!(
                "{}",
                format_summary(&outcome.report, Some(&outcome.paths), outcome.elapsed_seconds)
            );
            process::exit(outcome.exit_code());
        }
        Err(e) => {
            eprintln!("charity_link_check error: {:#}", e);
            process::exit(EXIT_FATAL);
        }
    }
}

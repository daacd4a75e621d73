//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use std::process::ExitCode;

use clap::error::ErrorKind;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use whale_boot::config::{ConfigError, field};

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0), including dry-run.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args or environment values.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Bootstrap error (exit code 2) - missing/malformed config, I/O or generator failure.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn bootstrap_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Handoff error (exit code 3) - the watcher could not be started.
    pub fn handoff_error() -> ExitCode {
        ExitCode::from(3)
    }
}

/// Reports a command-line rejection and picks the exit code.
///
/// Help and version output exit with success; any rejected value is an
/// input error, not clap's own usage code.
pub fn report_parse_error(error: &clap::Error) -> ExitCode {
    // Nothing more to report if stderr is gone
    let _ = error.print();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_code::SUCCESS,
        _ => exit_code::CONFIG_ERROR,
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::WATCHER => {
            eprintln!("\nSet WATCHER_BIN to the program that watches the configured addresses.");
        }
        ConfigError::InvalidDuration { .. } => {
            eprintln!("\nBOOT_NOTIFY_TIMEOUT is a whole number of seconds, e.g. 10.");
        }
        ConfigError::MissingRequired { .. } => {}
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

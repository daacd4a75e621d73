//! whale-boot: container bootstrap for the whale watcher
//!
//! Entry point for the whale-boot application.

use std::process::ExitCode;

use whale_boot::bootstrap::TemplateInputs;
use whale_boot::config::{Cli, ValidatedConfig};

mod app;
mod run;

use app::{exit_code, print_config_hint, report_parse_error, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(&e),
    };

    // Load and validate control inputs
    let config = match ValidatedConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging
    setup_tracing(config.verbose);
    tracing::info!("{config}");

    if let Err(code) = prepare(&config, TemplateInputs::from_env()) {
        return code;
    }

    if config.dry_run {
        tracing::info!(
            "[DRY-RUN] Would start: {}",
            config.watcher.display(&config.config_path)
        );
        return exit_code::SUCCESS;
    }

    match config.watcher.handoff(&config.config_path) {
        Ok(never) => match never {},
        Err(e) => {
            tracing::error!("Handoff failed: {e}");
            exit_code::handoff_error()
        }
    }
}

/// Runs the boot sequence on a runtime that is dropped before returning.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn prepare(config: &ValidatedConfig, inputs: TemplateInputs) -> Result<(), ExitCode> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            tracing::error!("Failed to create Tokio runtime: {e}");
            exit_code::bootstrap_error()
        })?;

    match runtime.block_on(run::execute(config, inputs)) {
        Ok(report) => {
            tracing::info!(
                "Boot complete: {} ({}), {} EVM / {} Solana whale(s), {} added",
                report.location.display(),
                report.decision,
                report.whales_evm,
                report.whales_solana,
                report.added
            );
            tracing::debug!("Notification: {:?}", report.notification);
            Ok(())
        }
        Err(e) => {
            tracing::error!("{e}");
            Err(exit_code::bootstrap_error())
        }
    }
}

//! Validated control inputs.
//!
//! All validation is performed during construction; the rest of the
//! program works with the normalized values only.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::bootstrap::{CommandGenerator, Generator, TemplateGenerator, TemplateInputs};
use crate::document::ChainKey;
use crate::handoff::MonitorCommand;
use crate::merge::MergeRequest;

use super::cli::Cli;
use super::error::{ConfigError, field};

/// Fully validated control inputs.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_cli`]. Blank optional values are normalized
/// to `None` so later stages never see empty strings.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Configuration file location
    pub config_path: PathBuf,

    /// Discard an existing configuration and generate a new one
    pub force_regen: bool,

    /// Whether the boot notification is enabled
    pub boot_notify: bool,

    /// Raw EVM addresses to merge, if any
    pub add_whales_evm: Option<String>,

    /// Raw Solana addresses to merge, if any
    pub add_whales_solana: Option<String>,

    /// Webhook endpoint for the boot notification
    pub webhook_url: Option<String>,

    /// Upper bound for the boot notification
    pub notify_timeout: Duration,

    /// External generator program; `None` selects the built-in template
    pub generator_program: Option<String>,

    /// Arguments for the external generator
    pub generator_args: Vec<String>,

    /// Watcher invocation
    pub watcher: MonitorCommand,

    /// Dry-run mode (prepare the configuration, skip notify and handoff)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ config: {}, force_regen: {}, boot_notify: {}, webhook: {}, \
             notify_timeout: {}s, generator: {}, watcher: {}, add_evm: {}, add_solana: {}, \
             dry_run: {} }}",
            self.config_path.display(),
            self.force_regen,
            self.boot_notify,
            if self.webhook_url.is_some() { "set" } else { "unset" },
            self.notify_timeout.as_secs(),
            self.generator_program.as_deref().unwrap_or("built-in"),
            self.watcher.program(),
            self.add_whales_evm.is_some(),
            self.add_whales_solana.is_some(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Validates CLI arguments (already merged with the environment by clap).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration path is empty
    /// - The notification timeout is zero
    /// - The watcher program is empty
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.config.as_os_str().is_empty() {
            return Err(ConfigError::missing(
                field::CONFIG,
                "Use --config or set WHALE_CONFIG",
            ));
        }

        let notify_timeout = Self::resolve_notify_timeout(cli.notify_timeout)?;

        let watcher_program = cli.watcher.trim();
        if watcher_program.is_empty() {
            return Err(ConfigError::missing(
                field::WATCHER,
                "Use --watcher or set WATCHER_BIN",
            ));
        }

        Ok(Self {
            config_path: cli.config.clone(),
            force_regen: cli.force_regen,
            boot_notify: cli.boot_notify,
            add_whales_evm: non_blank(cli.add_whales_evm.as_deref()),
            add_whales_solana: non_blank(cli.add_whales_solana.as_deref()),
            webhook_url: non_blank(cli.webhook_url.as_deref()),
            notify_timeout,
            generator_program: non_blank(cli.generator.as_deref()),
            generator_args: non_empty_args(&cli.generator_args),
            watcher: MonitorCommand::new(watcher_program)
                .with_args(non_empty_args(&cli.watcher_args)),
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    fn resolve_notify_timeout(seconds: u64) -> Result<Duration, ConfigError> {
        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: field::NOTIFY_TIMEOUT,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    /// Returns the notification endpoint, or `None` when notification is
    /// disabled or no webhook is configured.
    #[must_use]
    pub fn notify_endpoint(&self) -> Option<&str> {
        self.webhook_url.as_deref().filter(|_| self.boot_notify)
    }

    /// Merge requests for every chain with supplied addresses, EVM first.
    #[must_use]
    pub fn merge_requests(&self) -> Vec<MergeRequest> {
        [
            (ChainKey::evm(), &self.add_whales_evm),
            (ChainKey::solana(), &self.add_whales_solana),
        ]
        .into_iter()
        .filter_map(|(chain, raw)| raw.as_ref().map(|raw| MergeRequest::new(chain, raw.clone())))
        .collect()
    }

    /// Builds the generator: the external program if configured, otherwise
    /// the built-in template fed with `inputs`.
    #[must_use]
    pub fn generator(&self, inputs: TemplateInputs) -> Generator {
        match &self.generator_program {
            Some(program) => Generator::Command(
                CommandGenerator::new(program.clone()).with_args(self.generator_args.clone()),
            ),
            None => Generator::Template(TemplateGenerator::new(inputs)),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn non_empty_args(args: &[String]) -> Vec<String> {
    args.iter().filter(|a| !a.is_empty()).cloned().collect()
}

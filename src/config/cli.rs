//! CLI argument parsing using clap.
//!
//! Every option also reads an environment variable, so the container can be
//! configured without touching its command line.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

use super::defaults;

/// whale-boot: prepares the whale watcher configuration and starts the watcher
///
/// Generates the configuration on first start, merges operator-supplied
/// addresses, announces the boot and then hands off to the watcher.
#[derive(Debug, Parser)]
#[command(name = "whale-boot")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, short, env = "WHALE_CONFIG", default_value = defaults::CONFIG_PATH)]
    pub config: PathBuf,

    /// Discard any existing configuration and generate a new one
    #[arg(
        long = "force-regen",
        env = "FORCE_REGEN_CONFIG",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub force_regen: bool,

    /// Send the boot notification (true/false)
    #[arg(
        long = "boot-notify",
        env = "BOOT_NOTIFY",
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub boot_notify: bool,

    /// Comma-separated EVM addresses to add to the watch list
    #[arg(long = "add-whales-evm", env = "ADD_WHALES_EVM", value_name = "LIST")]
    pub add_whales_evm: Option<String>,

    /// Comma-separated Solana addresses to add to the watch list
    #[arg(long = "add-whales-solana", env = "ADD_WHALES_SOLANA", value_name = "LIST")]
    pub add_whales_solana: Option<String>,

    /// Webhook URL for the boot notification
    #[arg(long = "webhook-url", env = "DISCORD_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    /// Boot notification timeout in seconds
    #[arg(
        long = "notify-timeout",
        env = "BOOT_NOTIFY_TIMEOUT",
        value_name = "SECS",
        default_value_t = defaults::NOTIFY_TIMEOUT_SECS
    )]
    pub notify_timeout: u64,

    /// External generator program (defaults to the built-in template)
    #[arg(long, env = "CONFIG_GENERATOR", value_name = "PROGRAM")]
    pub generator: Option<String>,

    /// Argument for the generator, placed before `--out <path>` (can be specified multiple times)
    #[arg(
        long = "generator-arg",
        env = "CONFIG_GENERATOR_ARGS",
        value_name = "ARG",
        value_delimiter = ' ',
        allow_hyphen_values = true
    )]
    pub generator_args: Vec<String>,

    /// Watcher program started after bootstrap
    #[arg(long, env = "WATCHER_BIN", value_name = "PROGRAM", default_value = defaults::WATCHER_PROGRAM)]
    pub watcher: String,

    /// Argument for the watcher, placed before `--config <path>` (can be specified multiple times)
    #[arg(
        long = "watcher-arg",
        env = "WATCHER_ARGS",
        value_name = "ARG",
        value_delimiter = ' ',
        allow_hyphen_values = true
    )]
    pub watcher_args: Vec<String>,

    /// Test mode - prepare the configuration but neither notify nor start the watcher
    #[arg(
        long = "dry-run",
        env = "BOOT_DRY_RUN",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(
        long,
        short,
        env = "BOOT_VERBOSE",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub verbose: bool,
}

impl Cli {
    /// Parses CLI arguments from the command line and environment.
    ///
    /// # Errors
    ///
    /// Returns the clap error for rejected values, and for `--help` and
    /// `--version`, which clap reports as errors too.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}

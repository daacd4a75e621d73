//! Control inputs for whale-boot.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Default values ([`defaults`])
//!
//! # Sources
//!
//! Every option can be given on the command line or through its environment
//! variable; an explicit argument wins over the environment, which wins over
//! the built-in default. Inputs are read exactly once at startup.
//!
//! The built-in template generator reads its own variables (RPC endpoints,
//! thresholds) through [`TemplateInputs`](crate::bootstrap::TemplateInputs);
//! they are only validated when a configuration is actually generated.
//!
//! # List Values
//!
//! `CONFIG_GENERATOR_ARGS` and `WATCHER_ARGS` are split on spaces. Merge
//! inputs (`ADD_WHALES_*`) stay raw here and are split on commas by the
//! merge step.

mod cli;
pub mod defaults;
mod error;
mod validated;


pub use cli::Cli;
pub use error::{ConfigError, field};
pub use validated::ValidatedConfig;

//! Built-in default configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::document::{AddressSet, ConfigDocument};
use crate::store::{ConfigStore, FileConfigStore};

use super::{ConfigGenerator, GeneratorError};

/// Default DEX program ids watched on Solana.
const DEFAULT_SOL_PROGRAMS: [&str; 5] = [
    "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8", // Raydium AMM v4
    "CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK", // Raydium CLMM
    "CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C", // Raydium CPMM
    "whirLbMiicVdio4qvUfM5KAg6Ct8bWpYzGfF3uctyCc",  // Orca Whirlpools
    "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4",  // Jupiter swap
];

/// Environment variable names read by the template.
pub mod key {
    /// Ethereum websocket RPC (required)
    pub const ETH_WS: &str = "ETH_WS";
    /// Ethereum HTTP RPC (required)
    pub const ETH_HTTP: &str = "ETH_HTTP";
    /// Base websocket RPC (required)
    pub const BASE_WS: &str = "BASE_WS";
    /// Base HTTP RPC (required)
    pub const BASE_HTTP: &str = "BASE_HTTP";
    /// Solana websocket RPC (required)
    pub const HELIUS_WS: &str = "HELIUS_WS";
    /// Solana HTTP RPC (required)
    pub const HELIUS_HTTP: &str = "HELIUS_HTTP";
    /// Minimum trade value in USD
    pub const THRESHOLD_MIN_USD: &str = "THRESHOLD_MIN_USD";
    /// Minimum trade value in native coin
    pub const THRESHOLD_MIN_NATIVE: &str = "THRESHOLD_MIN_NATIVE";
    /// Initial EVM watch-addresses (comma-separated)
    pub const WHALES_EVM: &str = "WHALES_EVM";
    /// Initial Solana watch-addresses (comma-separated)
    pub const WHALES_SOL: &str = "WHALES_SOL";
    /// Auto-learn toggle
    pub const AUTOLEARN_ENABLED: &str = "AUTOLEARN_ENABLED";
    /// Auto-learn USD threshold
    pub const AUTOLEARN_MIN_USD: &str = "AUTOLEARN_MIN_USD";
    /// Auto-learn occurrences before promotion
    pub const AUTOLEARN_OCCURRENCES: &str = "AUTOLEARN_OCCURRENCES";
    /// Auto-learn window
    pub const AUTOLEARN_WINDOW_HOURS: &str = "AUTOLEARN_WINDOW_HOURS";
    /// Auto-learn daily cap
    pub const AUTOLEARN_MAX_NEW_PER_DAY: &str = "AUTOLEARN_MAX_NEW_PER_DAY";
    /// Auto-learn state file
    pub const AUTOLEARN_STATE_FILE: &str = "AUTOLEARN_STATE_FILE";
    /// Whether auto-learned addresses are written back to the config
    pub const AUTOLEARN_PERSIST_TO_CONFIG: &str = "AUTOLEARN_PERSIST_TO_CONFIG";

    /// Every key captured by [`super::TemplateInputs`].
    pub const ALL: [&str; 17] = [
        ETH_WS,
        ETH_HTTP,
        BASE_WS,
        BASE_HTTP,
        HELIUS_WS,
        HELIUS_HTTP,
        THRESHOLD_MIN_USD,
        THRESHOLD_MIN_NATIVE,
        WHALES_EVM,
        WHALES_SOL,
        AUTOLEARN_ENABLED,
        AUTOLEARN_MIN_USD,
        AUTOLEARN_OCCURRENCES,
        AUTOLEARN_WINDOW_HOURS,
        AUTOLEARN_MAX_NEW_PER_DAY,
        AUTOLEARN_STATE_FILE,
        AUTOLEARN_PERSIST_TO_CONFIG,
    ];
}

/// Snapshot of the template inputs, taken once at startup.
///
/// Values are validated only when the template is rendered, so a reused
/// configuration never fails on inputs it does not need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateInputs {
    values: BTreeMap<&'static str, String>,
}

impl TemplateInputs {
    /// Captures the template inputs from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Captures the template inputs through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = key::ALL
            .iter()
            .filter_map(|&name| lookup(name).map(|value| (name, value)))
            .collect();
        Self { values }
    }

    fn raw(&self, name: &'static str) -> Option<&str> {
        self.values
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, GeneratorError> {
        self.raw(name)
            .map(ToString::to_string)
            .ok_or(GeneratorError::MissingInput { name })
    }

    fn float(&self, name: &'static str, default: f64) -> Result<f64, GeneratorError> {
        let Some(value) = self.raw(name) else {
            return Ok(default);
        };
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| GeneratorError::InvalidInput {
                name,
                value: value.to_string(),
                reason: "expected a number".to_string(),
            })
    }

    fn integer(&self, name: &'static str, default: u32) -> Result<u32, GeneratorError> {
        let Some(value) = self.raw(name) else {
            return Ok(default);
        };
        value
            .parse::<u32>()
            .map_err(|e| GeneratorError::InvalidInput {
                name,
                value: value.to_string(),
                reason: e.to_string(),
            })
    }

    /// `1`, `true` and `yes` (any case) enable a flag; any other set value disables it.
    fn flag(&self, name: &'static str, default: bool) -> bool {
        self.raw(name).map_or(default, |value| {
            matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
        })
    }

    fn list(&self, name: &'static str) -> Vec<String> {
        self.raw(name)
            .map(crate::merge::parse_candidates)
            .unwrap_or_default()
    }

    /// Renders the default document.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::MissingInput`] for unset RPC endpoints and
    /// [`GeneratorError::InvalidInput`] for unparsable numbers.
    pub fn render(&self) -> Result<ConfigDocument, GeneratorError> {
        let whales_evm = AddressSet::from_entries(
            self.list(key::WHALES_EVM)
                .into_iter()
                .map(|address| address.to_lowercase()),
        );
        let whales_solana = AddressSet::from_entries(self.list(key::WHALES_SOL));

        let config = GeneratedConfig {
            chains: Chains {
                ethereum: EvmChain {
                    ws: self.required(key::ETH_WS)?,
                    http: self.required(key::ETH_HTTP)?,
                    explorer: "https://etherscan.io/tx/",
                    native_symbol: "ETH",
                    native_coingecko: "ethereum",
                    routers: vec![
                        Router {
                            name: "UniswapV2",
                            address: "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D",
                        },
                        Router {
                            name: "UniswapV3_SwapRouter02",
                            address: "0x68b3465833fb72A70ecDF485E0e4C7bD8665Fc45",
                        },
                    ],
                },
                base: EvmChain {
                    ws: self.required(key::BASE_WS)?,
                    http: self.required(key::BASE_HTTP)?,
                    explorer: "https://basescan.org/tx/",
                    native_symbol: "ETH",
                    native_coingecko: "ethereum",
                    routers: vec![Router {
                        name: "UniswapV3_Base",
                        address: "0x2626664c2603336E57B271c5C0b26F421741e481",
                    }],
                },
            },
            solana: Solana {
                http: self.required(key::HELIUS_HTTP)?,
                wss: self.required(key::HELIUS_WS)?,
                explorer_tx: "https://solscan.io/tx/",
                program_ids: DEFAULT_SOL_PROGRAMS.to_vec(),
            },
            whales_evm: whales_evm.into_vec(),
            whales_solana: whales_solana.into_vec(),
            thresholds: Thresholds {
                min_usd: self.float(key::THRESHOLD_MIN_USD, 50_000.0)?,
                min_native: self.float(key::THRESHOLD_MIN_NATIVE, 10.0)?,
            },
            autolearn: AutoLearn {
                enabled: self.flag(key::AUTOLEARN_ENABLED, true),
                min_usd: self.float(key::AUTOLEARN_MIN_USD, 250_000.0)?,
                occurrences: self.integer(key::AUTOLEARN_OCCURRENCES, 3)?,
                window_hours: self.integer(key::AUTOLEARN_WINDOW_HOURS, 24)?,
                max_new_per_day: self.integer(key::AUTOLEARN_MAX_NEW_PER_DAY, 5)?,
                state_file: self
                    .raw(key::AUTOLEARN_STATE_FILE)
                    .unwrap_or("/data/autolearn_state.json")
                    .to_string(),
                persist_to_config: self.flag(key::AUTOLEARN_PERSIST_TO_CONFIG, true),
            },
        };

        let value =
            serde_yaml::to_value(&config).map_err(|e| GeneratorError::Render(e.to_string()))?;
        ConfigDocument::from_value(value).map_err(|e| GeneratorError::Render(e.to_string()))
    }
}

#[derive(Serialize)]
struct GeneratedConfig {
    chains: Chains,
    solana: Solana,
    whales_evm: Vec<String>,
    whales_solana: Vec<String>,
    thresholds: Thresholds,
    autolearn: AutoLearn,
}

#[derive(Serialize)]
struct Chains {
    ethereum: EvmChain,
    base: EvmChain,
}

#[derive(Serialize)]
struct EvmChain {
    ws: String,
    http: String,
    explorer: &'static str,
    native_symbol: &'static str,
    native_coingecko: &'static str,
    routers: Vec<Router>,
}

#[derive(Serialize)]
struct Router {
    name: &'static str,
    address: &'static str,
}

#[derive(Serialize)]
struct Solana {
    http: String,
    wss: String,
    explorer_tx: &'static str,
    program_ids: Vec<&'static str>,
}

#[derive(Serialize)]
struct Thresholds {
    min_usd: f64,
    min_native: f64,
}

#[derive(Serialize)]
struct AutoLearn {
    enabled: bool,
    min_usd: f64,
    occurrences: u32,
    window_hours: u32,
    max_new_per_day: u32,
    state_file: String,
    persist_to_config: bool,
}

/// Writes the built-in defaults rendered from [`TemplateInputs`].
#[derive(Debug, Clone)]
pub struct TemplateGenerator {
    inputs: TemplateInputs,
}

impl TemplateGenerator {
    /// Creates a generator over captured inputs.
    #[must_use]
    pub const fn new(inputs: TemplateInputs) -> Self {
        Self { inputs }
    }
}

impl ConfigGenerator for TemplateGenerator {
    async fn generate(&self, target: &Path) -> Result<(), GeneratorError> {
        let document = self.inputs.render()?;
        FileConfigStore::new(target)
            .save(&document)
            .await
            .map_err(GeneratorError::Store)?;
        tracing::info!("Wrote default configuration to {}", target.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;

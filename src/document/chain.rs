//! Chain keys naming the per-chain address sections.

use std::fmt;

/// Identifier of a chain whose watch-addresses live in `whales_<chain>`.
///
/// Only the fixed keys below exist; each one is a plain YAML-safe suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainKey(String);

impl ChainKey {
    /// EVM chains share one list (`whales_evm`).
    pub const EVM: &'static str = "evm";
    /// Solana list (`whales_solana`).
    pub const SOLANA: &'static str = "solana";

    /// Key for the shared EVM list.
    #[must_use]
    pub fn evm() -> Self {
        Self(Self::EVM.to_string())
    }

    /// Key for the Solana list.
    #[must_use]
    pub fn solana() -> Self {
        Self(Self::SOLANA.to_string())
    }

    /// The document section holding this chain's addresses, e.g. `whales_evm`.
    #[must_use]
    pub fn section(&self) -> String {
        format!("whales_{}", self.0)
    }
}

impl fmt::Display for ChainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Startup decision: regenerate, generate or reuse the configuration.
//!
//! On every start the bootstrapper makes sure the configuration location
//! holds a valid document before anything else runs:
//! - force flag set: the existing file is removed and a new one generated
//! - no file: a new one is generated
//! - file present: it is loaded as is
//!
//! A present but unreadable file is never regenerated implicitly; that would
//! silently discard hand edits and learned addresses.

mod decision;
pub mod generator;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use decision::{BootstrapDecision, decide};
pub use generator::{
    CommandGenerator, ConfigGenerator, Generator, GeneratorError, TemplateGenerator,
    TemplateInputs,
};

use thiserror::Error;

use crate::document::ConfigDocument;
use crate::store::{ConfigStore, StoreError};

/// Errors that stop bootstrap. All of them are fatal.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Checking, removing or loading the configuration failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The generator failed.
    #[error("Configuration generation failed: {0}")]
    Generator(#[from] GeneratorError),

    /// The generator reported success but left no usable document.
    #[error("Generator did not produce a valid configuration: {0}")]
    Generated(#[source] StoreError),
}

/// A configuration ready for the rest of the pipeline.
#[derive(Debug, Clone)]
pub struct Bootstrapped {
    /// What was done on this startup
    pub decision: BootstrapDecision,
    /// The loaded document
    pub document: ConfigDocument,
}

/// Ensures a valid configuration exists at the store's location.
#[derive(Debug)]
pub struct Bootstrapper<'a, S, G> {
    store: &'a S,
    generator: &'a G,
}

impl<'a, S: ConfigStore, G: ConfigGenerator> Bootstrapper<'a, S, G> {
    /// Creates a bootstrapper over `store` using `generator` when needed.
    #[must_use]
    pub const fn new(store: &'a S, generator: &'a G) -> Self {
        Self { store, generator }
    }

    /// Runs the decision and returns the resulting document.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] if the location cannot be inspected or
    /// cleared, if generation fails, or if the document cannot be loaded.
    pub async fn prepare(&self, force: bool) -> Result<Bootstrapped, BootstrapError> {
        let location = self.store.location();

        if self.store.remove_stale_temp()? {
            tracing::warn!(
                "Removed leftover temp file from an interrupted save next to {}",
                location.display()
            );
        }

        let exists = self.store.exists()?;
        let decision = decide(force, exists);

        match decision {
            BootstrapDecision::ForceRegenerate => {
                let removed = self.store.remove()?;
                tracing::info!(
                    "Force regenerate requested: {} {}",
                    if removed { "removed" } else { "no existing file at" },
                    location.display()
                );
            }
            BootstrapDecision::GenerateFresh => {
                tracing::info!("No configuration at {}; generating", location.display());
            }
            BootstrapDecision::ReuseExisting => {
                tracing::info!("Reusing existing configuration at {}", location.display());
            }
        }

        let document = if decision.generates() {
            self.generator.generate(location).await?;
            let document = self.store.load().map_err(BootstrapError::Generated)?;
            tracing::info!(
                "Generated configuration at {} ({} sections)",
                location.display(),
                document.len()
            );
            document
        } else {
            self.store.load()?
        };

        Ok(Bootstrapped { decision, document })
    }
}

//! Boot sequence execution.
//!
//! Runs bootstrap, merge and notification in order on the caller's runtime.
//! The handoff to the watcher happens in `main` once the runtime is gone.

use std::path::{Path, PathBuf};

use thiserror::Error;

use whale_boot::bootstrap::{
    BootstrapDecision, BootstrapError, Bootstrapped, Bootstrapper, ConfigGenerator, TemplateInputs,
};
use whale_boot::config::ValidatedConfig;
use whale_boot::document::{ChainKey, ConfigDocument};
use whale_boot::merge::{MergeError, MergeOutcome, merge_all};
use whale_boot::notify::{HttpClient, Notifier, NotifyOutcome, ReqwestClient};
use whale_boot::store::{ConfigStore, FileConfigStore};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for fatal boot failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration could not be prepared.
    #[error("Bootstrap failed: {0}")]
    Bootstrap(#[source] BootstrapError),

    /// Supplied addresses could not be merged.
    #[error("Merge failed: {0}")]
    Merge(#[source] MergeError),
}

/// Summary of a completed boot sequence.
#[derive(Debug)]
pub struct BootReport {
    /// Configuration location
    pub location: PathBuf,
    /// What bootstrap did
    pub decision: BootstrapDecision,
    /// EVM addresses watched after merge
    pub whales_evm: usize,
    /// Solana addresses watched after merge
    pub whales_solana: usize,
    /// Addresses appended on this boot
    pub added: usize,
    /// What happened to the boot notification
    pub notification: NotifyOutcome,
}

/// Executes the boot sequence with production collaborators.
///
/// # Errors
///
/// Returns an error if bootstrap or merge fails. Notification failures are
/// logged and recorded in the report only.
#[cfg(not(tarpaulin_include))]
pub async fn execute(
    config: &ValidatedConfig,
    inputs: TemplateInputs,
) -> Result<BootReport, RunError> {
    let store = FileConfigStore::new(&config.config_path);
    let generator = config.generator(inputs);
    tracing::debug!("Generator: {}", generator.describe());

    let notifier = Notifier::new(
        ReqwestClient::new(),
        config.notify_endpoint().map(ToString::to_string),
        config.notify_timeout,
    );

    boot(&store, &generator, &notifier, config).await
}

/// Runs bootstrap, merge and notification over the given collaborators.
async fn boot<S, G, H>(
    store: &S,
    generator: &G,
    notifier: &Notifier<H>,
    config: &ValidatedConfig,
) -> Result<BootReport, RunError>
where
    S: ConfigStore,
    G: ConfigGenerator,
    H: HttpClient,
{
    let Bootstrapped { decision, document } = Bootstrapper::new(store, generator)
        .prepare(config.force_regen)
        .await
        .map_err(RunError::Bootstrap)?;

    let (document, outcomes) = merge_all(store, &document, &config.merge_requests())
        .await
        .map_err(RunError::Merge)?;
    let added = outcomes.iter().map(MergeOutcome::added_count).sum();

    let whales_evm = watched(&document, &ChainKey::evm());
    let whales_solana = watched(&document, &ChainKey::solana());
    let location = store.location().to_path_buf();
    let message = boot_message(&location, decision, whales_evm, whales_solana, added);

    let notification = if config.dry_run {
        tracing::info!("[DRY-RUN] Would send boot notification: {message}");
        NotifyOutcome::Skipped
    } else if !config.boot_notify {
        tracing::info!("Boot notification disabled (BOOT_NOTIFY=false)");
        NotifyOutcome::Skipped
    } else {
        notifier.announce(&message).await
    };

    Ok(BootReport {
        location,
        decision,
        whales_evm,
        whales_solana,
        added,
        notification,
    })
}

/// Number of addresses in a chain section; a malformed section counts as zero.
fn watched(document: &ConfigDocument, chain: &ChainKey) -> usize {
    match document.address_set(chain) {
        Ok(set) => set.len(),
        Err(e) => {
            tracing::warn!("Cannot count {}: {e}", chain.section());
            0
        }
    }
}

/// Formats the boot announcement.
fn boot_message(
    location: &Path,
    decision: BootstrapDecision,
    whales_evm: usize,
    whales_solana: usize,
    added: usize,
) -> String {
    let mut message = format!(
        "whale watcher booting: config={} ({decision}), whales_evm={whales_evm}, whales_solana={whales_solana}",
        location.display()
    );
    if added > 0 {
        message.push_str(&format!(", added {added}"));
    }
    message
}

//! Merging externally supplied watch-addresses into the configuration.
//!
//! Input arrives as one comma-separated string per chain (typically from an
//! environment variable). Candidates are normalized, deduplicated
//! case-insensitively against the persisted list and against each other, and
//! appended in input order. Re-running with the same input appends nothing.

use crate::document::{ChainKey, ConfigDocument, DocumentError};
use crate::store::{ConfigStore, StoreError};

use thiserror::Error;

/// Addresses to merge into one chain's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Target chain
    pub chain: ChainKey,
    /// Raw comma-separated input
    pub raw: String,
}

impl MergeRequest {
    /// Creates a request for `chain`.
    #[must_use]
    pub fn new(chain: ChainKey, raw: impl Into<String>) -> Self {
        Self {
            chain,
            raw: raw.into(),
        }
    }
}

/// Result of merging one request.
///
/// Zero appended entries is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Chain that was merged into
    pub chain: ChainKey,
    /// Newly appended addresses, in the order they were appended
    pub added: Vec<String>,
    /// Size of the list after the merge
    pub total: usize,
}

impl MergeOutcome {
    /// Number of appended addresses.
    #[must_use]
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}

/// Errors that abort a merge. Nothing is persisted when one occurs.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The address section cannot be interpreted.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The merged document could not be saved.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Splits raw input into trimmed, non-empty candidates.
///
/// Embedded line breaks are removed before splitting, so an address wrapped
/// across lines is joined back together.
#[must_use]
pub fn parse_candidates(raw: &str) -> Vec<String> {
    let flattened: String = raw.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();

    flattened
        .split(',')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Merges `raw` into the address list of `chain`.
///
/// The section is created if absent. The document is only modified when at
/// least one address is appended.
///
/// # Errors
///
/// Returns [`DocumentError`] if the existing section is not a list of strings;
/// the document is left unchanged.
pub fn merge(
    document: &mut ConfigDocument,
    chain: &ChainKey,
    raw: &str,
) -> Result<MergeOutcome, DocumentError> {
    let mut set = document.address_set(chain)?;

    let added: Vec<String> = parse_candidates(raw)
        .into_iter()
        .filter(|candidate| set.insert(candidate.as_str()))
        .collect();

    if !added.is_empty() {
        document.set_address_set(chain, &set);
    }

    Ok(MergeOutcome {
        chain: chain.clone(),
        added,
        total: set.len(),
    })
}

/// Applies every request and persists the result once.
///
/// Requests are applied to a working copy; the store is written only if all
/// requests succeed and at least one address was appended. On any error the
/// persisted document is exactly what it was before the call.
///
/// Returns the (possibly updated) document and one outcome per request.
///
/// # Errors
///
/// Returns [`MergeError::Document`] if a section is malformed and
/// [`MergeError::Store`] if saving fails.
pub async fn merge_all<S: ConfigStore>(
    store: &S,
    document: &ConfigDocument,
    requests: &[MergeRequest],
) -> Result<(ConfigDocument, Vec<MergeOutcome>), MergeError> {
    let mut working = document.clone();
    let mut outcomes = Vec::with_capacity(requests.len());

    for request in requests {
        let outcome = merge(&mut working, &request.chain, &request.raw)?;
        tracing::info!(
            "Merge into {}: {} new address(es), {} total",
            request.chain.section(),
            outcome.added_count(),
            outcome.total
        );
        for address in &outcome.added {
            tracing::debug!("Added {address} to {}", request.chain.section());
        }
        outcomes.push(outcome);
    }

    if outcomes.iter().any(|o| !o.added.is_empty()) {
        store.save(&working).await?;
        tracing::info!("Saved merged configuration to {}", store.location().display());
    } else if !requests.is_empty() {
        tracing::info!("No new addresses to merge; configuration left untouched");
    }

    Ok((working, outcomes))
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;

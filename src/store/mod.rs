//! Persistence of the configuration document.
//!
//! This module provides the [`ConfigStore`] abstraction over the single
//! durable location of the configuration document and its file-backed
//! implementation [`FileConfigStore`].

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::{FileConfigStore, temp_path_for};

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::{ConfigDocument, DocumentError};

/// Errors that can occur while loading or saving the configuration document.
///
/// Every variant is fatal for bootstrap: the monitoring process cannot be
/// started without a usable document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No configuration exists at the location.
    #[error("Configuration file '{}' does not exist", path.display())]
    Missing {
        /// Expected location
        path: PathBuf,
    },

    /// The file exists but does not hold a valid document.
    #[error("Configuration file '{}' is malformed: {source}", path.display())]
    Malformed {
        /// Location of the file
        path: PathBuf,
        /// What is wrong with the content
        #[source]
        source: DocumentError,
    },

    /// Reading, writing, renaming or removing the file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The document could not be encoded as YAML.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl StoreError {
    /// Creates an `Io` error for `path`.
    #[must_use]
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Abstraction over the durable location of the configuration document.
///
/// Implementations must:
/// - Report a missing document as [`StoreError::Missing`], never as empty
/// - Report unparsable content as [`StoreError::Malformed`]
/// - Save atomically so no reader observes a partially written document
pub trait ConfigStore: Send + Sync {
    /// The configuration location handed to the monitoring process.
    fn location(&self) -> &Path;

    /// Returns whether a document exists at the location.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if existence cannot be determined.
    fn exists(&self) -> Result<bool, StoreError>;

    /// Deletes the document. Returns `false` if it was already absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for any failure other than "not found".
    fn remove(&self) -> Result<bool, StoreError>;

    /// Deletes leftovers of an interrupted save. Returns `true` if one was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for any failure other than "not found".
    fn remove_stale_temp(&self) -> Result<bool, StoreError>;

    /// Loads and parses the document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`], [`StoreError::Malformed`] or
    /// [`StoreError::Io`].
    fn load(&self) -> Result<ConfigDocument, StoreError>;

    /// Persists the document atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] or [`StoreError::Io`]; on error the
    /// previously saved document is left in place.
    fn save(
        &self,
        document: &ConfigDocument,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

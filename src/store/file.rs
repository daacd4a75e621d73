//! File-based configuration store.

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::document::ConfigDocument;

use super::{ConfigStore, StoreError};

/// Returns the temporary path used while saving `path`.
///
/// Appends `.tmp` instead of replacing the extension
/// (`config.yaml` -> `config.yaml.tmp`, not `config.tmp`).
#[must_use]
pub fn temp_path_for(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.tmp", path.display()))
}

/// File-based implementation of [`ConfigStore`].
///
/// Stores the document as YAML.
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename:
/// 1. Write and fsync `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// A crash before the rename leaves the previous file intact plus a stale
/// temp file, which [`ConfigStore::remove_stale_temp`] cleans up on the next
/// startup.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Creates a store for the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writes `content` to the temp path and flushes it to disk.
    ///
    /// First half of a save; nothing is visible at `path` until
    /// [`Self::commit_temp`] runs.
    pub(crate) fn write_temp(path: &Path, content: &str) -> Result<PathBuf, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let temp_path = temp_path_for(path);
        let mut file = File::create(&temp_path).map_err(|e| StoreError::io(&temp_path, e))?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| StoreError::io(&temp_path, e))?;

        Ok(temp_path)
    }

    /// Moves a fully written temp file over `path`.
    pub(crate) fn commit_temp(temp_path: &Path, path: &Path) -> Result<(), StoreError> {
        // Atomic rename (on most filesystems)
        std::fs::rename(temp_path, path).map_err(|e| StoreError::io(path, e))
    }

    /// Performs the blocking save operation.
    ///
    /// Separated out so it can be wrapped in `spawn_blocking`.
    fn save_blocking(path: &Path, content: &str) -> Result<(), StoreError> {
        let temp_path = Self::write_temp(path, content)?;
        if let Err(e) = Self::commit_temp(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e);
        }
        Ok(())
    }
}

/// Removes `path`, treating "not found" as success.
fn remove_if_present(path: &Path) -> Result<bool, StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

impl ConfigStore for FileConfigStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> Result<bool, StoreError> {
        self.path
            .try_exists()
            .map_err(|e| StoreError::io(&self.path, e))
    }

    fn remove(&self) -> Result<bool, StoreError> {
        remove_if_present(&self.path)
    }

    fn remove_stale_temp(&self) -> Result<bool, StoreError> {
        remove_if_present(&temp_path_for(&self.path))
    }

    fn load(&self) -> Result<ConfigDocument, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::Missing {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        ConfigDocument::parse_bytes(&bytes).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, document: &ConfigDocument) -> Result<(), StoreError> {
        let path = self.path.clone();
        let content = document.to_yaml().map_err(StoreError::Serialize)?;

        // Use spawn_blocking to avoid blocking the async runtime
        tokio::task::spawn_blocking(move || Self::save_blocking(&path, &content))
            .await
            .expect("spawn_blocking task panicked")
    }
}

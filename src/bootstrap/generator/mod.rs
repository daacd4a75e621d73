//! Producers of a fresh configuration document.
//!
//! Two generators are available:
//! - [`CommandGenerator`] runs an external program with `--out <path>`
//! - [`TemplateGenerator`] renders the built-in defaults from environment inputs
//!
//! [`Generator`] selects one of them at startup.

mod command;
mod template;

pub use command::CommandGenerator;
pub use template::{TemplateGenerator, TemplateInputs};

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

use crate::store::StoreError;

/// Errors that prevent a configuration document from being generated.
///
/// All of them are fatal for bootstrap.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A required input is unset or blank.
    #[error("Missing required input: {name}")]
    MissingInput {
        /// Environment variable name
        name: &'static str,
    },

    /// An input could not be parsed.
    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidInput {
        /// Environment variable name
        name: &'static str,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// The external generator could not be started.
    #[error("Failed to start generator '{program}': {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The external generator exited unsuccessfully.
    #[error("Generator '{program}' failed: {status}")]
    Exit {
        /// Program that was invoked
        program: String,
        /// Its exit status
        status: ExitStatus,
    },

    /// The directory for the configuration file could not be created.
    #[error("Failed to create directory '{}': {source}", path.display())]
    CreateDir {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The rendered defaults could not be converted to a document.
    #[error("Failed to render default configuration: {0}")]
    Render(String),

    /// The rendered document could not be written.
    #[error("Failed to write generated configuration: {0}")]
    Store(#[source] StoreError),
}

/// Produces a valid configuration document at a location.
///
/// Implementations either succeed, leaving a complete document at `target`,
/// or fail; bootstrap verifies the result by loading it.
pub trait ConfigGenerator: Send + Sync {
    /// Generates the configuration at `target`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if no document could be produced.
    fn generate(
        &self,
        target: &Path,
    ) -> impl std::future::Future<Output = Result<(), GeneratorError>> + Send;
}

/// Generator chosen from the control inputs.
#[derive(Debug)]
pub enum Generator {
    /// External program
    Command(CommandGenerator),
    /// Built-in defaults
    Template(TemplateGenerator),
}

impl Generator {
    /// Human-readable description for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Command(command) => format!("command '{}'", command.program()),
            Self::Template(_) => "built-in template".to_string(),
        }
    }
}

impl ConfigGenerator for Generator {
    async fn generate(&self, target: &Path) -> Result<(), GeneratorError> {
        match self {
            Self::Command(command) => command.generate(target).await,
            Self::Template(template) => template.generate(target).await,
        }
    }
}

/// Creates the parent directory of `target` if needed.
fn ensure_parent(target: &Path) -> Result<(), GeneratorError> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| GeneratorError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

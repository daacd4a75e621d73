//! External generator program.

use std::path::Path;

use super::{ConfigGenerator, GeneratorError, ensure_parent};

/// Runs `<program> <args..> --out <target>` and waits for it.
///
/// The program inherits stdio so its diagnostics land in the container log.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    /// Creates a generator running `program` with no extra arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Sets arguments placed before `--out <target>`.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The program that is invoked.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds the command for `target`.
    #[must_use]
    pub fn command(&self, target: &Path) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args).arg("--out").arg(target);
        command
    }
}

impl ConfigGenerator for CommandGenerator {
    async fn generate(&self, target: &Path) -> Result<(), GeneratorError> {
        ensure_parent(target)?;

        tracing::debug!("Running generator: {} --out {}", self.program, target.display());
        let status = self
            .command(target)
            .status()
            .await
            .map_err(|source| GeneratorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(GeneratorError::Exit {
                program: self.program.clone(),
                status,
            });
        }

        Ok(())
    }
}

//! Transfer of control to the long-running watcher.

use std::convert::Infallible;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// Error returned when the watcher cannot be started.
#[derive(Debug, Error)]
pub enum HandoffError {
    /// The watcher program could not be executed.
    #[error("Failed to start watcher '{program}': {source}")]
    Start {
        /// Program that was invoked
        program: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// The watcher invocation: program plus fixed leading arguments.
///
/// The config location is always passed last as `--config <location>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorCommand {
    program: String,
    args: Vec<String>,
}

impl MonitorCommand {
    /// Creates a command for `program` with no extra arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Sets the arguments placed before `--config`.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Returns the watcher program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds the process command for the given config location.
    #[must_use]
    pub fn command(&self, location: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg("--config").arg(location);
        command
    }

    /// Renders the invocation for log output.
    #[must_use]
    pub fn display(&self, location: &Path) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 3);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.push("--config".to_string());
        parts.push(location.display().to_string());
        parts.join(" ")
    }

    /// Replaces the current process with the watcher.
    ///
    /// Returns only if the watcher could not be started.
    ///
    /// # Errors
    ///
    /// Returns [`HandoffError::Start`] if the program cannot be executed.
    #[cfg(unix)]
    pub fn handoff(&self, location: &Path) -> Result<Infallible, HandoffError> {
        use std::os::unix::process::CommandExt;

        tracing::info!("Handing off to {}", self.display(location));
        let source = self.command(location).exec();
        Err(self.start_error(source))
    }

    /// Runs the watcher to completion and exits with its status code.
    ///
    /// Returns only if the watcher could not be started.
    ///
    /// # Errors
    ///
    /// Returns [`HandoffError::Start`] if the program cannot be spawned.
    #[cfg(not(unix))]
    pub fn handoff(&self, location: &Path) -> Result<Infallible, HandoffError> {
        tracing::info!("Handing off to {}", self.display(location));
        let status = self
            .command(location)
            .status()
            .map_err(|source| self.start_error(source))?;
        std::process::exit(status.code().unwrap_or(1))
    }

    fn start_error(&self, source: std::io::Error) -> HandoffError {
        HandoffError::Start {
            program: self.program.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::path::PathBuf;

    fn args_of(command: &Command) -> Vec<&OsStr> {
        command.get_args().collect()
    }

    #[test]
    fn config_flag_comes_last() {
        let monitor = MonitorCommand::new("whale-watcher")
            .with_args(vec!["--log-level".to_string(), "debug".to_string()]);
        let location = PathBuf::from("/data/config.yaml");

        let command = monitor.command(&location);

        assert_eq!(command.get_program(), "whale-watcher");
        assert_eq!(
            args_of(&command),
            ["--log-level", "debug", "--config", "/data/config.yaml"]
        );
    }

    #[test]
    fn bare_program_gets_only_config() {
        let monitor = MonitorCommand::new("python");
        let command = monitor.command(Path::new("cfg.yaml"));

        assert_eq!(args_of(&command), ["--config", "cfg.yaml"]);
    }

    #[test]
    fn display_matches_invocation() {
        let monitor = MonitorCommand::new("python").with_args(vec!["-m".into(), "watcher".into()]);

        assert_eq!(
            monitor.display(Path::new("/data/config.yaml")),
            "python -m watcher --config /data/config.yaml"
        );
    }

    #[test]
    fn missing_program_fails_to_start() {
        let monitor = MonitorCommand::new("/nonexistent/whale-watcher-binary");

        let err = monitor.handoff(Path::new("cfg.yaml")).unwrap_err();

        let HandoffError::Start { program, source } = err;
        assert_eq!(program, "/nonexistent/whale-watcher-binary");
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
    }
}

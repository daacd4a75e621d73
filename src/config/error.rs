//! Error types for control input validation.

use thiserror::Error;

/// Error type for invalid control inputs.
///
/// These are reported before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value is empty.
    #[error("Missing required value: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The configuration location.
    pub const CONFIG: &str = "config";
    /// The watcher program.
    pub const WATCHER: &str = "watcher";
    /// The notification timeout.
    pub const NOTIFY_TIMEOUT: &str = "notify_timeout";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}

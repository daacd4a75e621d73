//! Default values for control inputs.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Default configuration location inside the container volume.
pub const CONFIG_PATH: &str = "/data/config.yaml";

/// Default notification timeout in seconds.
pub const NOTIFY_TIMEOUT_SECS: u64 = 10;

/// Default watcher program.
pub const WATCHER_PROGRAM: &str = "whale-watcher";

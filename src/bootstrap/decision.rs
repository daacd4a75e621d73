//! Per-startup configuration decision.

use std::fmt;

/// What bootstrap does with the configuration location on this startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapDecision {
    /// Force flag set: discard any existing file and generate a new one.
    ForceRegenerate,
    /// No file yet: generate one.
    GenerateFresh,
    /// File present: use it as is.
    ReuseExisting,
}

impl BootstrapDecision {
    /// Returns `true` if the generator must run.
    #[must_use]
    pub const fn generates(self) -> bool {
        matches!(self, Self::ForceRegenerate | Self::GenerateFresh)
    }

    /// Short label used in logs and notifications.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ForceRegenerate => "force",
            Self::GenerateFresh => "generate",
            Self::ReuseExisting => "reuse",
        }
    }
}

impl fmt::Display for BootstrapDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Computes the decision from the force flag and whether a file exists.
#[must_use]
pub const fn decide(force: bool, exists: bool) -> BootstrapDecision {
    if force {
        BootstrapDecision::ForceRegenerate
    } else if exists {
        BootstrapDecision::ReuseExisting
    } else {
        BootstrapDecision::GenerateFresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_wins_regardless_of_existence() {
        assert_eq!(decide(true, true), BootstrapDecision::ForceRegenerate);
        assert_eq!(decide(true, false), BootstrapDecision::ForceRegenerate);
    }

    #[test]
    fn absent_file_generates() {
        assert_eq!(decide(false, false), BootstrapDecision::GenerateFresh);
    }

    #[test]
    fn present_file_is_reused() {
        assert_eq!(decide(false, true), BootstrapDecision::ReuseExisting);
    }

    #[test]
    fn only_reuse_skips_generation() {
        assert!(BootstrapDecision::ForceRegenerate.generates());
        assert!(BootstrapDecision::GenerateFresh.generates());
        assert!(!BootstrapDecision::ReuseExisting.generates());
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(BootstrapDecision::ForceRegenerate.to_string(), "force");
        assert_eq!(BootstrapDecision::GenerateFresh.to_string(), "generate");
        assert_eq!(BootstrapDecision::ReuseExisting.to_string(), "reuse");
    }
}

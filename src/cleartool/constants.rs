//! cleartool-specific constants
//!
//! Centralized definitions for cleartool command names, flags, and output
//! patterns.

/// cleartool command binary name
pub const CLEARTOOL_COMMAND: &str = "cleartool";

/// cleartool subcommands
pub mod commands {
    pub const LSHISTORY: &str = "lshistory";
    pub const LSVIEW: &str = "lsview";
}

/// cleartool command flags
pub mod flags {
    /// Descend into directory elements
    pub const RECURSE: &str = "-recurse";
    /// Exclude checked-out (uncommitted) versions from history
    pub const NO_CHECKOUT: &str = "-nco";
    /// Lower time bound for lshistory
    pub const SINCE: &str = "-since";
    /// Output format template
    pub const FORMAT: &str = "-fmt";
}

/// Event names as printed by `%e`
pub mod events {
    /// The only event that represents committed content
    pub const CREATE_VERSION: &str = "create version";
}

/// Error detection patterns in cleartool output
pub mod errors {
    /// Pattern indicating an unknown view tag (lsview)
    pub const NO_MATCHING_VIEW: &str = "No matching entries found for view tag";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleartool_command_name() {
        assert_eq!(CLEARTOOL_COMMAND, "cleartool");
    }

    #[test]
    fn test_flags_are_dash_prefixed() {
        for flag in [flags::RECURSE, flags::NO_CHECKOUT, flags::SINCE, flags::FORMAT] {
            assert!(flag.starts_with('-'));
        }
    }
}

//! `[resolve]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [resolve]
//! missing_marker = "warn"     # skip | warn | error
//! ```

use macros::Config;
use serde::{Deserialize, Serialize};

/// What to do with a bundle whose destination marker is not in the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMarker {
    /// Drop the bundle silently.
    Skip,
    /// Drop the bundle and log a warning.
    #[default]
    Warn,
    /// Fail the resolution pass.
    Error,
}

/// Resolution pass settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "resolve")]
pub struct ResolveConfig {
    /// Policy for bundles whose destination marker is absent.
    pub missing_marker: MissingMarker,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_default_warns() {
        let config = test_parse_config("");
        assert_eq!(config.resolve.missing_marker, MissingMarker::Warn);
    }

    #[test]
    fn test_policies() {
        for (raw, expected) in [
            ("skip", MissingMarker::Skip),
            ("warn", MissingMarker::Warn),
            ("error", MissingMarker::Error),
        ] {
            let config = test_parse_config(&format!("[resolve]\nmissing_marker = \"{raw}\""));
            assert_eq!(config.resolve.missing_marker, expected);
        }
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = crate::config::RequiresConfig::from_str("[resolve]\nmissing_marker = \"ignore\"");
        assert!(result.is_err());
    }
}

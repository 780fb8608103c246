//! `[compress]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [compress]
//! enable = true               # Pass compressible tags through the bundler
//! minify = true               # Built-in bundler minifies inline blocks
//! ```

use macros::Config;
use serde::{Deserialize, Serialize};

/// Bundling of compressible assets.
///
/// Remote files (`http://`, `https://`, `//`) never reach the bundler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "compress")]
pub struct CompressConfig {
    /// Run compressible tags through the bundler.
    pub enable: bool,
    /// Minify inline `<style>`/`<script>` bodies in the built-in bundler.
    pub minify: bool,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            enable: false,
            minify: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(!config.compress.enable);
        assert!(config.compress.minify);
    }

    #[test]
    fn test_enable() {
        let config = test_parse_config("[compress]\nenable = true\nminify = false");
        assert!(config.compress.enable);
        assert!(!config.compress.minify);
    }
}

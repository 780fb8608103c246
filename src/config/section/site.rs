//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! static_root = "/static/"    # Prepended to relative asset paths
//! ```
//!
//! `static_root` may also be a full URL, e.g. `https://cdn.example.com/assets/`.

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};

/// Site-wide asset location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "site")]
pub struct SiteConfig {
    /// Base URL or path prepended to relative asset file names.
    pub static_root: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            static_root: "/static/".into(),
        }
    }
}

impl SiteConfig {
    /// Validate site configuration.
    ///
    /// # Checks
    /// - A `static_root` carrying a scheme must parse as an absolute URL
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let root = self.static_root.as_str();
        if root.contains("://")
            && let Err(err) = url::Url::parse(root)
        {
            diag.error_with_hint(
                Self::FIELDS.static_root,
                format!("`{root}` is not a valid URL: {err}"),
                "use a path like \"/static/\" or a full URL like \"https://cdn.example.com/\"",
            );
        }
    }
}

//! Configuration management for `requires.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── site       # [site]
//! │   ├── asset_type # [css], [js]
//! │   ├── compress   # [compress]
//! │   └── resolve    # [resolve]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # RequiresConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                            |
//! |--------------|----------------------------------------------------|
//! | `[site]`     | `static_root` prepended to relative files          |
//! | `[css]`      | Stylesheet template, token, path table, markers    |
//! | `[js]`       | Script template, token, path table, markers        |
//! | `[compress]` | Bundling/minification of compressible tags         |
//! | `[resolve]`  | Missing destination marker policy                  |

pub mod section;
pub mod types;

pub use section::{
    AssetTypeConfig, CompressConfig, MissingMarker, ResolveConfig, SiteConfig, URL_SLOT,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::asset::AssetKind;
use crate::log;
use crate::registry::token::{GROUP_SLOT, INDEX_SLOT};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "requires.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing requires.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiresConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Static asset root
    #[serde(default)]
    pub site: SiteConfig,

    /// Stylesheet settings
    #[serde(default)]
    pub css: AssetTypeConfig,

    /// Script settings
    #[serde(default)]
    pub js: AssetTypeConfig,

    /// Bundling settings
    #[serde(default)]
    pub compress: CompressConfig,

    /// Resolution pass settings
    #[serde(default)]
    pub resolve: ResolveConfig,
}

impl Default for RequiresConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            site: SiteConfig::default(),
            css: AssetTypeConfig::defaults(AssetKind::Css),
            js: AssetTypeConfig::defaults(AssetKind::Js),
            compress: CompressConfig::default(),
            resolve: ResolveConfig::default(),
        }
    }
}

impl RequiresConfig {
    /// Load and validate configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_path(path)?;
        config.config_path = path.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        let config = config.finalize();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config: Self = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config.finalize(), ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Lay the asset sections over their built-in defaults.
    fn finalize(mut self) -> Self {
        self.css = self.css.overlay(AssetKind::Css);
        self.js = self.js.overlay(AssetKind::Js);
        self
    }

    /// Settings for one asset kind.
    pub fn asset(&self, kind: AssetKind) -> &AssetTypeConfig {
        match kind {
            AssetKind::Css => &self.css,
            AssetKind::Js => &self.js,
        }
    }

    /// Serialize to TOML (used by `requires init`).
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        for kind in AssetKind::ALL {
            self.asset(kind).validate(kind, &mut diag);
        }
        self.validate_distinct_tokens(&mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Stylesheet and script tokens must not collide, or the first scan
    /// would consume the other kind's placeholders.
    fn validate_distinct_tokens(&self, diag: &mut ConfigDiagnostics) {
        let probe = |token: &str| token.replace(GROUP_SLOT, "g").replace(INDEX_SLOT, "0");
        if probe(&self.css.token) == probe(&self.js.token) {
            diag.error_with_hint(
                AssetTypeConfig::fields(AssetKind::Js).token,
                "css and js tokens are identical",
                "give each kind its own marker text, e.g. `@@@CSS:...` and `@@@JS:...`",
            );
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> RequiresConfig {
    let (parsed, ignored) = RequiresConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = RequiresConfig::from_str("[css\ntemplate = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_str_validates() {
        let err = RequiresConfig::from_str("[js]\ntoken = \"@@@JS:<GROUP>@@@\"").unwrap_err();
        assert!(err.to_string().contains("js.token"));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = RequiresConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config, test_parse_config(""));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\nstatic_root = \"/s/\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = RequiresConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.static_root, "/s/");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_identical_tokens_rejected() {
        let config = test_parse_config("[js]\ntoken = \"@@@CSS:<GROUP>:<INDEX>@@@\"");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("identical"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[site]\nstatic_root = \"/assets/\"\n[compress]\nenable = true").unwrap();

        let config = RequiresConfig::load(file.path()).unwrap();
        assert_eq!(config.site.static_root, "/assets/");
        assert!(config.compress.enable);
        assert_eq!(config.config_path, file.path());
        assert_eq!(config.js, AssetTypeConfig::defaults(AssetKind::Js));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RequiresConfig::load(&dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_load_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[css]\ntemplate = \"<link>\"").unwrap();
        assert!(RequiresConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let config = RequiresConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("static_root"));
        assert_eq!(RequiresConfig::from_str(&text).unwrap(), config);
    }
}

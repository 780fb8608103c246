//! Asset kind definitions.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RequiresError;

/// Kind of required asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Stylesheet (`.css` files, `style` blocks).
    Css,
    /// Script (`.js` files, `script` blocks).
    Js,
}

impl AssetKind {
    /// Resolution order: stylesheets before scripts.
    pub const ALL: [AssetKind; 2] = [AssetKind::Css, AssetKind::Js];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
        }
    }

    /// Derive the kind from a file name or URL.
    ///
    /// Query strings and fragments are ignored, the extension is matched
    /// case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, RequiresError> {
        let path = filename
            .split(['?', '#'])
            .next()
            .unwrap_or(filename);
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("css") => Ok(Self::Css),
            Some("js" | "mjs") => Ok(Self::Js),
            _ => Err(RequiresError::UnsupportedAsset(filename.to_string())),
        }
    }

    /// Map a block type (`style` / `script`) to its kind.
    pub fn from_blocktype(blocktype: &str) -> Result<Self, RequiresError> {
        match blocktype {
            "style" => Ok(Self::Css),
            "script" => Ok(Self::Js),
            other => Err(RequiresError::UnknownBlockType(other.to_string())),
        }
    }

    /// Wrap inline content in the element for this kind.
    pub fn wrap_block(self, content: &str) -> String {
        match self {
            Self::Css => format!("\t<style>{content}</style>\n"),
            Self::Js => format!("\t<script>{content}</script>\n"),
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

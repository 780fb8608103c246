//! A single declared asset awaiting rendering.

use std::borrow::Cow;

use super::{AssetKind, path};
use crate::config::RequiresConfig;

/// One declared asset: a file to link or an inline block to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// File referenced by name or URL.
    File { kind: AssetKind, name: String },
    /// Inline content identified by a unique name.
    Block {
        kind: AssetKind,
        name: String,
        content: String,
    },
}

impl Requirement {
    pub fn file(kind: AssetKind, name: impl Into<String>) -> Self {
        Self::File {
            kind,
            name: name.into(),
        }
    }

    pub fn block(kind: AssetKind, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Block {
            kind,
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            Self::File { kind, .. } | Self::Block { kind, .. } => *kind,
        }
    }

    /// Key used for at-most-once inclusion (file name or block name).
    pub fn unique_id(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Block { name, .. } => name,
        }
    }

    /// Remote files bypass bundling; everything else may be bundled.
    pub fn is_compressible(&self) -> bool {
        match self {
            Self::File { name, .. } => !path::is_remote(name),
            Self::Block { .. } => true,
        }
    }

    /// Render to markup.
    pub fn render(&self, config: &RequiresConfig) -> String {
        match self {
            Self::File { kind, name } => {
                let asset = config.asset(*kind);
                let url = if path::is_absolute(name) {
                    Cow::Borrowed(name.as_str())
                } else {
                    Cow::Owned(path::join_url(
                        &config.site.static_root,
                        asset.subpath_for(name),
                        name,
                    ))
                };
                asset.render_file(&url)
            }
            Self::Block { kind, content, .. } => kind.wrap_block(content),
        }
    }
}

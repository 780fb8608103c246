//! Errors raised while declaring or resolving requirements.

use thiserror::Error;

use crate::asset::AssetKind;

/// Error type returned by bundlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from the declaration and resolution passes.
#[derive(Debug, Error)]
pub enum RequiresError {
    #[error("unknown block type `{0}` (expected `script` or `style`)")]
    UnknownBlockType(String),

    #[error("cannot tell the asset type of `{0}` (expected a .css or .js file)")]
    UnsupportedAsset(String),

    #[error("{kind} token for group `{group}` points at missing requirement #{index}")]
    DanglingToken {
        kind: AssetKind,
        group: String,
        index: usize,
    },

    #[error("no destination marker for {kind} group `{group}`")]
    NoDestination { kind: AssetKind, group: String },

    #[error("destination marker `{marker}` for {kind} group `{group}` not found in page")]
    MissingMarker {
        kind: AssetKind,
        group: String,
        marker: String,
    },

    #[error("invalid {kind} token pattern `{pattern}`")]
    TokenPattern {
        kind: AssetKind,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{kind} token pattern `{pattern}` has no `{slot}`")]
    TokenSlot {
        kind: AssetKind,
        pattern: String,
        slot: &'static str,
    },

    #[error("failed to bundle {kind} assets")]
    Bundle {
        kind: AssetKind,
        #[source]
        source: BoxError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RequiresError::MissingMarker {
            kind: AssetKind::Js,
            group: "default".into(),
            marker: "</body>".into(),
        };
        let display = err.to_string();
        assert!(display.contains("</body>"));
        assert!(display.contains("js group `default`"));

        let err = RequiresError::DanglingToken {
            kind: AssetKind::Css,
            group: "inhead".into(),
            index: 7,
        };
        assert!(err.to_string().contains("#7"));
    }

    #[test]
    fn test_bundle_error_keeps_source() {
        use std::error::Error as _;

        let err = RequiresError::Bundle {
            kind: AssetKind::Css,
            source: "bad stylesheet".into(),
        };
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("bad stylesheet"));
    }
}

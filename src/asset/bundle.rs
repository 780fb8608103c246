//! Bundling of compressible asset markup.

use super::AssetKind;
use crate::error::BoxError;

/// Rewrites the compressible markup of one asset kind before it is inserted.
///
/// Receives the concatenated tags of one (kind, group) bundle and returns
/// replacement markup. Remote files never reach a bundler.
pub trait Bundler: Send + Sync {
    fn bundle(&self, kind: AssetKind, markup: &str) -> Result<String, BoxError>;
}

impl<F> Bundler for F
where
    F: Fn(AssetKind, &str) -> Result<String, BoxError> + Send + Sync,
{
    fn bundle(&self, kind: AssetKind, markup: &str) -> Result<String, BoxError> {
        self(kind, markup)
    }
}

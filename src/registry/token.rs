//! Placeholder tokens.
//!
//! A token encodes (kind, group, index) in text emitted at declaration time.
//! The resolution pass finds tokens again with a regex compiled from the
//! same pattern, one per (kind, group).

use parking_lot::RwLock;
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::asset::AssetKind;
use crate::error::RequiresError;

/// Substitution point for the group name.
pub const GROUP_SLOT: &str = "<GROUP>";
/// Substitution point for the ordinal index.
pub const INDEX_SLOT: &str = "<INDEX>";

/// Build the token for one requirement.
pub fn encode(pattern: &str, group: &str, index: usize) -> String {
    pattern
        .replace(GROUP_SLOT, group)
        .replace(INDEX_SLOT, &index.to_string())
}

/// Compile the regex matching every token of `group`.
///
/// Literal text and the group name are escaped; the index is captured as
/// `index`. Both slots must be present.
pub fn compile(kind: AssetKind, pattern: &str, group: &str) -> Result<Regex, RequiresError> {
    if let Some(slot) = [GROUP_SLOT, INDEX_SLOT]
        .into_iter()
        .find(|slot| !pattern.contains(slot))
    {
        return Err(RequiresError::TokenSlot {
            kind,
            pattern: pattern.to_string(),
            slot,
        });
    }
    let source = regex::escape(pattern)
        .replace(GROUP_SLOT, &regex::escape(group))
        .replace(INDEX_SLOT, r"(?P<index>\d+)");
    Regex::new(&source).map_err(|source| RequiresError::TokenPattern {
        kind,
        pattern: pattern.to_string(),
        source,
    })
}

/// Compiled token regexes, keyed by (kind, group).
///
/// Shared by every request handled by one engine.
#[derive(Debug, Default)]
pub struct TokenCache {
    compiled: RwLock<FxHashMap<(AssetKind, String), Regex>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the regex for (kind, group), compiling it on first use.
    pub fn get(&self, kind: AssetKind, pattern: &str, group: &str) -> Result<Regex, RequiresError> {
        if let Some(re) = self.compiled.read().get(&(kind, group.to_string())) {
            return Ok(re.clone());
        }
        let re = compile(kind, pattern, group)?;
        self.compiled
            .write()
            .entry((kind, group.to_string()))
            .or_insert_with(|| re.clone());
        Ok(re)
    }

    pub fn len(&self) -> usize {
        self.compiled.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.read().is_empty()
    }
}

//! Per-request requirement registry.
//!
//! A [`RequestContext`] is created by whatever handles a request, threaded
//! through template rendering, and emptied by the resolution pass. It is
//! never shared between requests, so it needs no locking.

pub mod token;

use rustc_hash::FxHashSet;

use crate::asset::{AssetKind, Requirement};

/// Requirements of one group, one ordered list per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRequirements {
    css: Vec<Requirement>,
    js: Vec<Requirement>,
}

impl GroupRequirements {
    pub fn get(&self, kind: AssetKind) -> &[Requirement] {
        match kind {
            AssetKind::Css => &self.css,
            AssetKind::Js => &self.js,
        }
    }

    fn list_mut(&mut self, kind: AssetKind) -> &mut Vec<Requirement> {
        match kind {
            AssetKind::Css => &mut self.css,
            AssetKind::Js => &mut self.js,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.css.is_empty() && self.js.is_empty()
    }
}

/// Registry entry of a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Render blocks inline instead of emitting tokens (AJAX fragments).
    incremental: bool,
    /// Groups in first-declaration order.
    groups: Vec<(String, GroupRequirements)>,
    /// File and block names already declared.
    seen: FxHashSet<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for an incremental (AJAX-style) request.
    pub fn incremental() -> Self {
        Self {
            incremental: true,
            ..Self::default()
        }
    }

    pub fn is_incremental(&self) -> bool {
        self.incremental
    }

    /// Record `unique_id`; returns `false` if it was already declared.
    pub fn mark_seen(&mut self, unique_id: &str) -> bool {
        if self.seen.contains(unique_id) {
            return false;
        }
        self.seen.insert(unique_id.to_string())
    }

    pub fn has_seen(&self, unique_id: &str) -> bool {
        self.seen.contains(unique_id)
    }

    /// Append a requirement to its (kind, group) list, returning its index.
    pub fn push(&mut self, group: &str, requirement: Requirement) -> usize {
        let kind = requirement.kind();
        let list = self.group_mut(group).list_mut(kind);
        list.push(requirement);
        list.len() - 1
    }

    fn group_mut(&mut self, group: &str) -> &mut GroupRequirements {
        let pos = match self.groups.iter().position(|(name, _)| name == group) {
            Some(pos) => pos,
            None => {
                self.groups
                    .push((group.to_string(), GroupRequirements::default()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[pos].1
    }

    pub fn group(&self, group: &str) -> Option<&GroupRequirements> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, reqs)| reqs)
    }

    /// Groups in first-declaration order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &GroupRequirements)> {
        self.groups.iter().map(|(name, reqs)| (name.as_str(), reqs))
    }

    /// Whether no requirement is waiting for resolution.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|(_, reqs)| reqs.is_empty())
    }

    /// Number of pending requirements across all groups and kinds.
    pub fn len(&self) -> usize {
        self.groups
            .iter()
            .map(|(_, reqs)| reqs.css.len() + reqs.js.len())
            .sum()
    }

    /// Drop every requirement and unique id.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.seen.clear();
    }
}

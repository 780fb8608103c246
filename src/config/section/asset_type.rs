//! `[css]` and `[js]` section configuration.
//!
//! Both sections share one shape. Values given in `requires.toml` are laid
//! over the built-in defaults: `template` and `token` replace the default,
//! `prefixes` and `destinations` are merged entry by entry.
//!
//! # Example
//!
//! ```toml
//! [js]
//! template = "\t<script src='{url}' defer></script>\n"
//! token = "@@@JS:<GROUP>:<INDEX>@@@"
//!
//! [js.prefixes]
//! "" = "js/"                  # Default sub path under `site.static_root`
//! "vendor/" = "lib/"          # vendor/x.js -> /static/lib/vendor/x.js
//!
//! [js.destinations]
//! default = "</body>"         # Group -> marker the tags are inserted before
//! inhead = "</head>"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::asset::AssetKind;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::registry::token::{GROUP_SLOT, INDEX_SLOT};

/// Substitution point for the resolved asset URL in `template`.
pub const URL_SLOT: &str = "{url}";

/// Settings for one asset kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetTypeConfig {
    /// Markup for one file; `{url}` is replaced with the resolved URL.
    pub template: String,
    /// Placeholder token with `<GROUP>` and `<INDEX>` substitution points.
    pub token: String,
    /// File name prefix -> sub path under `site.static_root`.
    pub prefixes: BTreeMap<String, String>,
    /// Group name -> marker the group's tags are inserted before.
    pub destinations: BTreeMap<String, String>,
}

/// Field paths of one asset section, for diagnostics.
pub struct AssetTypeFields {
    pub template: FieldPath,
    pub token: FieldPath,
    pub prefixes: FieldPath,
    pub destinations: FieldPath,
}

const CSS_FIELDS: AssetTypeFields = AssetTypeFields {
    template: FieldPath::new("css.template"),
    token: FieldPath::new("css.token"),
    prefixes: FieldPath::new("css.prefixes"),
    destinations: FieldPath::new("css.destinations"),
};

const JS_FIELDS: AssetTypeFields = AssetTypeFields {
    template: FieldPath::new("js.template"),
    token: FieldPath::new("js.token"),
    prefixes: FieldPath::new("js.prefixes"),
    destinations: FieldPath::new("js.destinations"),
};

impl AssetTypeConfig {
    /// Field paths for the section of `kind`.
    pub const fn fields(kind: AssetKind) -> &'static AssetTypeFields {
        match kind {
            AssetKind::Css => &CSS_FIELDS,
            AssetKind::Js => &JS_FIELDS,
        }
    }

    /// Built-in settings for `kind`.
    pub fn defaults(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Css => Self {
                template: "\t<link href='{url}' rel='stylesheet'>\n".into(),
                token: "@@@CSS:<GROUP>:<INDEX>@@@".into(),
                prefixes: BTreeMap::from([(String::new(), "css/".into())]),
                destinations: BTreeMap::from([("default".into(), "</head>".into())]),
            },
            AssetKind::Js => Self {
                template: "\t<script src='{url}'></script>\n".into(),
                token: "@@@JS:<GROUP>:<INDEX>@@@".into(),
                prefixes: BTreeMap::from([(String::new(), "js/".into())]),
                destinations: BTreeMap::from([
                    ("default".into(), "</body>".into()),
                    ("inhead".into(), "</head>".into()),
                ]),
            },
        }
    }

    /// Lay user settings over the defaults for `kind`.
    pub fn overlay(self, kind: AssetKind) -> Self {
        let mut merged = Self::defaults(kind);
        if !self.template.is_empty() {
            merged.template = self.template;
        }
        if !self.token.is_empty() {
            merged.token = self.token;
        }
        merged.prefixes.extend(self.prefixes);
        merged.destinations.extend(self.destinations);
        merged
    }

    /// Render the file template for a resolved URL.
    pub fn render_file(&self, url: &str) -> String {
        self.template.replace(URL_SLOT, url)
    }

    /// Sub path for `filename`: the entry with the longest matching prefix.
    ///
    /// The empty prefix matches everything and acts as the default.
    pub fn subpath_for(&self, filename: &str) -> &str {
        self.prefixes
            .iter()
            .filter(|(prefix, _)| filename.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, subpath)| subpath.as_str())
            .unwrap_or("")
    }

    /// Destination marker for `group`. An empty marker disables the group.
    pub fn destination(&self, group: &str) -> Option<&str> {
        self.destinations
            .get(group)
            .map(String::as_str)
            .filter(|marker| !marker.is_empty())
    }

    /// Whether the text between the two slots contains a non-digit.
    fn slots_are_separated(&self) -> bool {
        let (Some(group), Some(index)) = (self.token.find(GROUP_SLOT), self.token.find(INDEX_SLOT))
        else {
            return false;
        };
        let between = if group < index {
            &self.token[group + GROUP_SLOT.len()..index]
        } else {
            &self.token[index + INDEX_SLOT.len()..group]
        };
        between.chars().any(|c| !c.is_ascii_digit())
    }

    /// Validate one asset section.
    ///
    /// # Checks
    /// - `template` contains `{url}`
    /// - `token` contains `<GROUP>` and `<INDEX>` exactly once each, apart
    ///   from each other by at least one non-digit
    pub fn validate(&self, kind: AssetKind, diag: &mut ConfigDiagnostics) {
        let fields = Self::fields(kind);

        if !self.template.contains(URL_SLOT) {
            diag.error_with_hint(
                fields.template,
                format!("{} does not contain `{URL_SLOT}`", fields.template),
                format!("add `{URL_SLOT}` where the {kind} file URL belongs"),
            );
        }

        let mut slots_ok = true;
        for slot in [GROUP_SLOT, INDEX_SLOT] {
            let count = self.token.matches(slot).count();
            if count != 1 {
                slots_ok = false;
                diag.error(
                    fields.token,
                    format!(
                        "{} must contain `{slot}` exactly once (found {count})",
                        fields.token
                    ),
                );
            }
        }
        if slots_ok && !self.slots_are_separated() {
            diag.error_with_hint(
                fields.token,
                format!("{} needs a separator between `{GROUP_SLOT}` and `{INDEX_SLOT}`", fields.token),
                "without one, groups `a` and `a1` produce the same tokens; use e.g. `:`",
            );
        }

        for (group, marker) in &self.destinations {
            if marker.is_empty() {
                diag.warn(
                    fields.destinations,
                    format!("group `{group}` has an empty marker, its {kind} tags are dropped"),
                );
            }
        }
    }
}

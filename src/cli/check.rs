//! `requires check`: validate the config file and summarize it.

use std::path::Path;

use anyhow::{Result, bail};
use requires::{AssetKind, RequiresConfig, log};

use super::plural_count;

/// Validate the config at `path` and print its effective settings.
pub fn check_config(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!(
            "config file '{}' not found. Run 'requires init' to create one",
            path.display()
        );
    }
    let config = RequiresConfig::load(path)?;
    for line in summarize(&config) {
        log!("check"; "{}", line);
    }
    log!("check"; "{} is valid", path.display());
    Ok(())
}

/// One line per asset kind and destination.
fn summarize(config: &RequiresConfig) -> Vec<String> {
    let mut lines = vec![format!("static root: {}", config.site.static_root)];
    for kind in AssetKind::ALL {
        let asset = config.asset(kind);
        lines.push(format!(
            "{kind}: token {}, {}",
            asset.token,
            plural_count(asset.destinations.len(), "destination")
        ));
        for (group, marker) in &asset.destinations {
            match asset.destination(group) {
                Some(_) => lines.push(format!("  {group} -> before {marker}")),
                None => lines.push(format!("  {group} -> disabled")),
            }
        }
    }
    lines.push(format!(
        "compress: {}",
        if config.compress.enable { "on" } else { "off" }
    ));
    lines
}

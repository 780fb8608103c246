//! `requires init`: write a default config file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use requires::{RequiresConfig, log};

/// Default config with a header comment.
pub fn generate_config_template() -> Result<String> {
    let mut out = format!(
        "# requires configuration file (v{})\n\
         # Empty destination markers disable a group.\n\n",
        env!("CARGO_PKG_VERSION")
    );
    out.push_str(&RequiresConfig::default().to_toml()?);
    Ok(out)
}

/// Write the default config to `path`, refusing to overwrite unless `force`.
pub fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "'{}' already exists. Use --force to overwrite it",
            path.display()
        );
    }
    fs::write(path, generate_config_template()?)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
    log!("init"; "wrote {}", path.display());
    Ok(())
}

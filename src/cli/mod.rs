//! Command-line interface module.

mod args;
pub mod check;
pub mod init;
pub mod render;

pub use args::{Cli, Commands, RenderArgs};

use std::path::Path;

use anyhow::Result;
use requires::{RequiresConfig, debug};

/// Load the config at `path`, or defaults when the file does not exist.
pub fn load_or_default(path: &Path) -> Result<RequiresConfig> {
    if path.exists() {
        return RequiresConfig::load(path);
    }
    debug!("config"; "{} not found, using defaults", path.display());
    Ok(RequiresConfig::default())
}

/// `1 file`, `3 files`.
pub fn plural_count(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

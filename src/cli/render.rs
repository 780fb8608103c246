//! `requires render`: expand a template and run the resolution pass.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use requires::{MissingMarker, RequestContext, Requires, RequiresConfig, debug, log, template};

use super::{RenderArgs, plural_count};

/// Render `args.input` with `config`, writing to `args.output` or stdout.
pub fn render_page(args: &RenderArgs, config: RequiresConfig) -> Result<()> {
    let source = read_input(&args.input)?;
    let html = render_str(args, apply_overrides(args, config), &source)
        .with_context(|| format!("failed to render {}", args.input.display()))?;
    write_output(args.output.as_deref(), &html)
}

/// Apply command-line overrides on top of the loaded config.
fn apply_overrides(args: &RenderArgs, mut config: RequiresConfig) -> RequiresConfig {
    if let Some(enable) = args.compress {
        config.compress.enable = enable;
    }
    if args.strict {
        config.resolve.missing_marker = MissingMarker::Error;
    }
    config
}

fn render_str(args: &RenderArgs, config: RequiresConfig, source: &str) -> Result<String> {
    let requires = Requires::new(config);
    let mut ctx = if args.ajax {
        RequestContext::incremental()
    } else {
        RequestContext::new()
    };

    let html = template::expand(&requires, Some(&mut ctx), source)?;
    let pending = ctx.len();
    let html = requires.resolve(&mut ctx, &html)?;

    debug!("render"; "resolved {}", plural_count(pending, "requirement"));
    Ok(html)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read template from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(path: Option<&Path>, html: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log!("render"; "wrote {}", path.display());
        }
        None => io::stdout().write_all(html.as_bytes())?,
    }
    Ok(())
}

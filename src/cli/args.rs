//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Declare css/js requirements in templates and resolve them into tags
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: requires.toml)
    #[arg(short = 'C', long, global = true, default_value = "requires.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print declaration and resolution details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Expand directives in a template and resolve its requirements
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },

    /// Validate the config file
    #[command(visible_alias = "c")]
    Check,

    /// Write a default config file
    #[command(visible_alias = "i")]
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

/// Render command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Template to render. Use `-` to read from stdin.
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Write the page here instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Render as an incremental (AJAX) fragment: blocks are emitted inline
    #[arg(short, long)]
    pub ajax: bool,

    /// Pass compressible tags through the built-in bundler
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub compress: Option<bool>,

    /// Fail when a destination marker is missing from the page
    #[arg(long)]
    pub strict: bool,
}

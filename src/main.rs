//! requires - resolve css/js requirements declared in templates.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    requires::logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Render { args } => {
            let config = cli::load_or_default(&cli.config)?;
            cli::render::render_page(args, config)
        }
        Commands::Check => cli::check::check_config(&cli.config),
        Commands::Init { force } => cli::init::write_config(&cli.config, *force),
    }
}

//! svgnorm - rebase SVG stroke documents onto a canonical 0-100 viewBox.

#![allow(dead_code)]

mod cli;
mod config;
mod gather;
mod logger;
mod pipeline;
mod svg;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ToolConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = ToolConfig::load(cli.config.as_deref())?;
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }

    match &cli.command {
        Commands::Normalize { args } => cli::normalize::run_normalize(args, &config),
        Commands::Gather { args } => cli::gather::run_gather(args, &config),
    }
}

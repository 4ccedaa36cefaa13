//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Rebase SVG stroke documents onto a canonical 0 0 100 100 viewBox
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: search upward for svgnorm.toml)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Normalize SVG documents into the canonical coordinate space
    #[command(visible_alias = "n")]
    Normalize {
        #[command(flatten)]
        args: NormalizeArgs,
    },

    /// Copy character-named SVGs (e.g. 4e9c.svg) out of a source directory
    #[command(visible_alias = "g")]
    Gather {
        #[command(flatten)]
        args: GatherArgs,
    },
}

/// Normalize command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Source SVG files
    #[arg(required = true, value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    /// Output file (single input only). Default: `name.raw.svg` -> `name.svg`,
    /// otherwise `name.norm.svg`
    #[arg(short, long, conflicts_with = "output_dir", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Write outputs into this directory instead of next to each input
    #[arg(short = 'd', long, value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,
}

/// Gather command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct GatherArgs {
    /// Characters to gather, one key per character
    #[arg(short, long, required_unless_present = "manifest", conflicts_with = "manifest")]
    pub keys: Option<String>,

    /// JSON manifest: array of objects carrying the key character in `--field`
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    /// Manifest field holding the key character [default: kanji]
    #[arg(short, long)]
    pub field: Option<String>,

    /// Directory of hex-named SVG files
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Destination directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,
}

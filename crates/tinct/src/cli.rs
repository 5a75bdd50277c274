//! Command-line definition.
//!
//! Parsing stays here; [`crate::config`] turns the parsed arguments into
//! validated configs before anything is read from disk.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

pub const DEFAULT_TEMPLATE: &str = "templates/base-style.json";
pub const DEFAULT_ALPHA: &str = "palettes/alpha.json";

/// Generate editor themes from compact role-based palettes
#[derive(Debug, Parser)]
#[command(name = "tinct")]
#[command(version)]
#[command(about = "Generate editor themes from compact role-based palettes")]
#[command(long_about = "Generate editor themes from compact role-based palettes.\n\n\
    A palette names a handful of roles (surface, text, love, foam...). tinct\n\
    expands it against a style template into a complete theme, and can diff\n\
    the result against a reference theme to infer overrides and alpha.\n\n\
    Set TINCT_LOG (e.g. TINCT_LOG=tinct_engine=trace) for fine-grained logs.")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a palette into a theme document
    Generate(GenerateArgs),

    /// Build a starter palette from an existing theme
    Extract(ExtractArgs),

    /// Rewrite JSON files with grouped, sorted keys
    Fmt(FmtArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Palette document (JSON, or YAML by extension)
    #[arg(long, value_name = "FILE")]
    pub palette: PathBuf,

    /// Style template listing every key the theme carries
    #[arg(long, value_name = "FILE", env = "TINCT_TEMPLATE", default_value = DEFAULT_TEMPLATE)]
    pub template: PathBuf,

    /// Shared alpha config; a missing file means no shared alpha
    #[arg(long, value_name = "FILE", env = "TINCT_ALPHA", default_value = DEFAULT_ALPHA)]
    pub alpha: PathBuf,

    /// Output theme path [default: generated/themes/<palette>.json]
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Keep template keys even when the palette carries a full style fragment
    #[arg(long)]
    pub no_prune: bool,

    /// Reference theme to diff the generated style against
    #[arg(long, value_name = "FILE")]
    pub compare: Option<PathBuf>,

    /// Pin reference values of unmatched keys as palette overrides
    #[arg(long, requires = "compare")]
    pub write_overrides: bool,

    /// Replace existing overrides instead of adding to them
    #[arg(long, requires = "write_overrides")]
    pub rewrite_overrides: bool,

    /// Infer the palette's alpha table from the reference
    #[arg(long, requires = "compare")]
    pub write_alpha: bool,

    /// Drop overrides that the alpha table already reproduces
    #[arg(long, requires = "compare")]
    pub prune_alpha_overrides: bool,

    /// Mark names and the output file as work in progress
    #[arg(long)]
    pub wip: bool,

    /// Keep unset template keys in the output
    #[arg(long)]
    pub keep_unset: bool,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Theme document to read
    #[arg(long, value_name = "FILE")]
    pub theme: PathBuf,

    /// Output palette path [default: palettes/<theme>.json]
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Comma-separated style keys to copy into the palette's style fragment
    #[arg(long, value_name = "KEYS")]
    pub style_keys: Option<String>,

    /// Infer the palette's alpha table against the shared alpha config
    #[arg(long)]
    pub with_alpha: bool,

    /// Shared alpha config used with --with-alpha
    #[arg(long, value_name = "FILE", env = "TINCT_ALPHA", default_value = DEFAULT_ALPHA)]
    pub alpha: PathBuf,
}

#[derive(Debug, Args)]
pub struct FmtArgs {
    /// Files to rewrite in place
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

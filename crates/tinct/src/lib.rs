//! # tinct - Editor Themes from Role-Based Palettes
//!
//! The command-line front end for [`tinct_engine`]. It owns everything the
//! engine deliberately leaves out: argument parsing, file I/O, YAML input,
//! logging setup and terminal output.
//!
//! ## Commands
//!
//! - `generate`: resolve a palette against a style template and write the
//!   theme document (plus a flat blur variant for blurred palettes). With
//!   `--compare`, diff against a reference theme and optionally write the
//!   inferred overrides and alpha back into the palette.
//! - `extract`: build a starter palette from an existing theme.
//! - `fmt`: rewrite JSON files with keys grouped by prefix.
//!
//! ## Library Use
//!
//! ```rust,no_run
//! use clap::Parser;
//! use tinct::cli::Cli;
//!
//! let cli = Cli::parse_from(["tinct", "generate", "--palette", "palettes/night.json"]);
//! tinct::run(cli).unwrap();
//! ```

pub mod blur;
pub mod cli;
pub mod commands;
pub mod config;
pub mod format;
pub mod io;
pub mod logging;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::config::{ExtractConfig, GenerateConfig};

/// Runs a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => {
            let config = GenerateConfig::try_from(args)?;
            commands::generate::run(&config)?;
        }
        Commands::Extract(args) => {
            let config = ExtractConfig::try_from(args)?;
            commands::extract::run(&config)?;
        }
        Commands::Fmt(args) => commands::fmt::run(&args.files)?,
    }
    Ok(())
}

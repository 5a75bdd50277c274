//! Validated command configuration.
//!
//! Parsed arguments become plain config structs with every default path
//! resolved. Validation happens here so that a bad invocation fails before
//! any file is read or written.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tinct_engine::InferOptions;

use crate::cli::{ExtractArgs, GenerateArgs};

/// Directory generated themes land in when `--out` is not given.
pub const GENERATED_THEMES_DIR: &str = "generated/themes";

/// Directory extracted palettes land in when `--out` is not given.
pub const PALETTES_DIR: &str = "palettes";

/// Errors in a command's configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A default output path needs the input's file stem.
    #[error("cannot derive an output name from {}", .path.display())]
    NoFileStem {
        /// The input path without a usable stem.
        path: PathBuf,
    },

    /// The output would overwrite one of the inputs.
    #[error("output {} would overwrite the {role}", .path.display())]
    OutputIsInput {
        /// The clashing path.
        path: PathBuf,
        /// Which input it clashes with.
        role: &'static str,
    },

    /// `--rewrite-overrides` without `--write-overrides`.
    #[error("--rewrite-overrides requires --write-overrides")]
    RewriteWithoutWrite,

    /// A write flag without a reference to infer from.
    #[error("--write-overrides, --write-alpha and --prune-alpha-overrides require --compare")]
    WriteWithoutCompare,
}

fn file_stem(path: &Path) -> Result<String, ConfigError> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::NoFileStem {
            path: path.to_path_buf(),
        })
}

/// Configuration for `tinct generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub palette: PathBuf,
    pub template: PathBuf,
    pub alpha: PathBuf,
    /// Resolved output path.
    pub out: PathBuf,
    pub prune: bool,
    pub compare: Option<PathBuf>,
    pub infer: InferOptions,
    pub wip: bool,
    pub keep_unset: bool,
}

impl GenerateConfig {
    /// Where the theme goes when no output path is given.
    pub fn default_output(palette: &Path, wip: bool) -> Result<PathBuf, ConfigError> {
        let stem = file_stem(palette)?;
        let name = if wip {
            format!("{stem}.wip.json")
        } else {
            format!("{stem}.json")
        };
        Ok(Path::new(GENERATED_THEMES_DIR).join(name))
    }
}

impl TryFrom<GenerateArgs> for GenerateConfig {
    type Error = ConfigError;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        let infer = InferOptions {
            write_overrides: args.write_overrides,
            rewrite_overrides: args.rewrite_overrides,
            write_alpha: args.write_alpha,
            prune_alpha: args.prune_alpha_overrides,
        };
        if infer.rewrite_overrides && !infer.write_overrides {
            return Err(ConfigError::RewriteWithoutWrite);
        }
        if infer.writes_anything() && args.compare.is_none() {
            return Err(ConfigError::WriteWithoutCompare);
        }

        let out = match args.out {
            Some(out) => out,
            None => Self::default_output(&args.palette, args.wip)?,
        };
        if out == args.palette {
            return Err(ConfigError::OutputIsInput {
                path: out,
                role: "palette",
            });
        }

        Ok(Self {
            palette: args.palette,
            template: args.template,
            alpha: args.alpha,
            out,
            prune: !args.no_prune,
            compare: args.compare,
            infer,
            wip: args.wip,
            keep_unset: args.keep_unset,
        })
    }
}

/// Configuration for `tinct extract`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub theme: PathBuf,
    /// Resolved output path.
    pub out: PathBuf,
    pub style_keys: Option<String>,
    /// Shared alpha config, present only when alpha should be inferred.
    pub alpha: Option<PathBuf>,
}

impl TryFrom<ExtractArgs> for ExtractConfig {
    type Error = ConfigError;

    fn try_from(args: ExtractArgs) -> Result<Self, Self::Error> {
        let out = match args.out {
            Some(out) => out,
            None => Path::new(PALETTES_DIR).join(format!("{}.json", file_stem(&args.theme)?)),
        };
        if out == args.theme {
            return Err(ConfigError::OutputIsInput {
                path: out,
                role: "theme",
            });
        }

        Ok(Self {
            theme: args.theme,
            out,
            style_keys: args.style_keys.filter(|keys| !keys.trim().is_empty()),
            alpha: args.with_alpha.then_some(args.alpha),
        })
    }
}

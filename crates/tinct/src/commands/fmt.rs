//! `tinct fmt`: rewrite JSON files in grouped form.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::format::to_grouped_string;

/// Formats every file, stopping at the first failure.
pub fn run(files: &[PathBuf]) -> Result<()> {
    for path in files {
        format_file(path)?;
    }
    Ok(())
}

pub fn format_file(path: &Path) -> Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let formatted = to_grouped_string(&value);
    if formatted == text {
        debug!(path = %path.display(), "already formatted");
        return Ok(());
    }
    fs::write(path, formatted).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), "formatted");
    Ok(())
}

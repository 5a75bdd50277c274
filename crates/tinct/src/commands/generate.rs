//! `tinct generate`: palette in, theme document out.

use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use tinct_engine::{Inferencer, Palette, Resolver, StyleDiff, StyleMap, ThemeDocument};
use tracing::{debug, info};

use crate::blur::{blur_output_path, blur_variant, should_generate_blur_variant};
use crate::config::GenerateConfig;
use crate::io;

/// What a generate run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub out: PathBuf,
    /// Path of the flat blur variant, when one was written.
    pub blur_out: Option<PathBuf>,
    /// Diff against the `--compare` reference.
    pub diff: Option<StyleDiff>,
    /// Whether inferred changes were written back to the palette.
    pub palette_updated: bool,
}

/// Runs `generate`. All inputs are loaded before anything is written.
pub fn run(config: &GenerateConfig) -> Result<GenerateReport> {
    let palette = io::read_palette(&config.palette)?;
    let template = io::read_template(&config.template)?;
    let alpha = palette.effective_alpha(&io::read_alpha(&config.alpha)?);
    let reference = config
        .compare
        .as_deref()
        .map(io::read_reference)
        .transpose()?;

    let resolver = Resolver::new(&template, &alpha).prune(config.prune);
    let style = resolver.resolve(&palette);
    let document = ThemeDocument::from_style(&palette, &style, config.keep_unset, config.wip);

    let mut report = GenerateReport {
        out: config.out.clone(),
        blur_out: None,
        diff: None,
        palette_updated: false,
    };

    if let (Some(reference), Some(path)) = (&reference, &config.compare) {
        let diff = StyleDiff::between(reference, &style.to_json(config.keep_unset));
        print!("{}", summary(path, &diff));
        debug!(changed = ?diff.changed, missing = ?diff.missing, "compare details");

        if config.infer.writes_anything() {
            let updated =
                Inferencer::new(&template, &alpha, reference).apply(&palette, &diff, &config.infer);
            io::write_palette(&config.palette, &updated)?;
            info!(path = %config.palette.display(), "updated palette");
            report.palette_updated = true;
        }
        report.diff = Some(diff);
    }

    io::write_json(&config.out, &document)?;
    info!(path = %config.out.display(), keys = document.themes[0].style.len(), "wrote theme");

    if should_generate_blur_variant(&palette.meta) {
        report.blur_out = write_blur_variant(config, &resolver, &palette)?;
    }
    Ok(report)
}

fn write_blur_variant(
    config: &GenerateConfig,
    resolver: &Resolver<'_>,
    palette: &Palette,
) -> Result<Option<PathBuf>> {
    let Some(out) = blur_output_path(&config.out) else {
        debug!(path = %config.out.display(), "output is already a blur theme");
        return Ok(None);
    };
    let variant = blur_variant(palette);
    let style: StyleMap = resolver.resolve(&variant);
    let document = ThemeDocument::from_style(&variant, &style, config.keep_unset, config.wip);
    io::write_json(&out, &document)?;
    info!(path = %out.display(), "wrote blur variant");
    Ok(Some(out))
}

fn count(n: usize) -> console::StyledObject<usize> {
    if n == 0 {
        style(n).green()
    } else {
        style(n).yellow().bold()
    }
}

/// The compare summary printed to stdout.
pub fn summary(reference: &Path, diff: &StyleDiff) -> String {
    let mut out = format!("{} {}\n", style("compare").bold(), reference.display());
    out.push_str(&format!("  missing in generated: {}\n", count(diff.missing.len())));
    out.push_str(&format!("  extra in generated: {}\n", count(diff.extra.len())));
    out.push_str(&format!("  value diffs: {}\n", count(diff.changed.len())));
    if diff.converged() {
        out.push_str(&format!("  {}\n", style("converged").green()));
    }
    out
}

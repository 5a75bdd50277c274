//! `tinct extract`: theme in, starter palette out.

use anyhow::{Context, Result};
use tinct_engine::extract::{infer_alpha_table, palette_from_theme, pick_style_keys};
use tinct_engine::{reference_style, Palette};
use tracing::info;

use crate::config::ExtractConfig;
use crate::io;

pub fn run(config: &ExtractConfig) -> Result<Palette> {
    let theme = io::read_theme(&config.theme)?;
    let mut palette = palette_from_theme(&theme)
        .with_context(|| format!("extracting palette from {}", config.theme.display()))?;
    let style = reference_style(&theme)?;

    if let Some(keys) = &config.style_keys {
        palette.style = pick_style_keys(&style, keys);
    }
    if let Some(path) = &config.alpha {
        let base = io::read_alpha(path)?;
        palette.alpha = infer_alpha_table(&palette, &base, &style);
    }

    io::write_palette(&config.out, &palette)?;
    info!(
        path = %config.out.display(),
        roles = palette.roles.len(),
        alpha = palette.alpha.table(palette.meta.appearance()).len(),
        "wrote palette"
    );
    Ok(palette)
}

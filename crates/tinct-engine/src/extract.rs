//! Building a starter palette from an existing theme.
//!
//! Extraction runs the role mapping backwards: each role is read from the
//! style keys it would normally fill, semantic names and terminal colors are
//! copied verbatim, and (optionally) the alpha table is inferred the same way
//! the override inferencer does it. The result is a palette that regenerates
//! a theme close to the source, ready for `generate --compare` to close the
//! remaining gap.

use serde_json::{Map, Value};
use tracing::debug;

use crate::color::strip_alpha;
use crate::document::reference_style;
use crate::error::{DocumentKind, Error, Result};
use crate::infer::infer_alpha_overrides;
use crate::palette::{AlphaConfig, Meta, Palette};
use crate::rules::SEMANTIC_DEFAULTS;

/// How a role is recovered from a style.
struct RoleSource {
    role: &'static str,
    /// Tried in order; the first non-empty string wins.
    keys: &'static [&'static str],
    opaque: bool,
}

const fn source(role: &'static str, keys: &'static [&'static str]) -> RoleSource {
    RoleSource {
        role,
        keys,
        opaque: false,
    }
}

const fn opaque(role: &'static str, keys: &'static [&'static str]) -> RoleSource {
    RoleSource {
        role,
        keys,
        opaque: true,
    }
}

const ROLE_SOURCES: &[RoleSource] = &[
    opaque("surface", &["editor.background"]),
    opaque("base", &["background"]),
    opaque("overlay", &["editor.active_line.background"]),
    source("muted", &["text.muted"]),
    source("subtle", &["text.placeholder"]),
    source("text", &["text"]),
    source("love", &["error"]),
    source("gold", &["warning", "modified"]),
    source("rose", &["modified", "conflict"]),
    source("pine", &["info", "success"]),
    source("foam", &["text.accent", "link_text.hover"]),
    source("iris", &["renamed", "keyword"]),
    opaque("highlight_low", &["element.hover"]),
    opaque("highlight_med", &["element.selected"]),
    opaque("highlight_high", &["ghost_element.active"]),
];

fn string_at<'v>(map: &'v Map<String, Value>, key: &str) -> Option<&'v str> {
    map.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn meta_string(value: Option<&Value>, key: &str) -> String {
    value
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Builds a palette from a theme document.
pub fn palette_from_theme(theme: &Value) -> Result<Palette> {
    let style = reference_style(theme)?;
    let first = theme.get("themes").and_then(|t| t.get(0));

    let meta = Meta {
        name: meta_string(Some(theme), "name"),
        author: meta_string(Some(theme), "author"),
        appearance: meta_string(first, "appearance"),
        theme_name: meta_string(first, "name"),
        background_appearance: string_at(&style, "background.appearance")
            .unwrap_or_default()
            .to_string(),
        blur_mode: String::new(),
    };

    let mut palette = Palette {
        meta,
        ..Palette::default()
    };

    for source in ROLE_SOURCES {
        let Some(color) = source.keys.iter().find_map(|key| string_at(&style, key)) else {
            continue;
        };
        let color = if source.opaque {
            strip_alpha(color)
        } else {
            color.to_string()
        };
        palette.roles.insert(source.role.to_string(), color);
    }

    for (name, _) in SEMANTIC_DEFAULTS {
        if let Some(color) = string_at(&style, name) {
            palette.semantic.insert(name.to_string(), color.to_string());
        }
    }

    if let Some(accents) = style.get("accents").and_then(Value::as_array) {
        palette.accents = accents
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
    }

    palette.terminal = style
        .iter()
        .filter(|(key, _)| key.starts_with("terminal."))
        .filter_map(|(key, value)| Some((key.clone(), value.as_str()?.to_string())))
        .collect();

    debug!(
        roles = palette.roles.len(),
        semantic = palette.semantic.len(),
        terminal = palette.terminal.len(),
        "extracted palette"
    );
    Ok(palette)
}

/// Parses a theme document and builds a palette from it.
pub fn palette_from_json_str(input: &str) -> Result<Palette> {
    let theme: Value = serde_json::from_str(input).map_err(Error::parse(DocumentKind::Theme))?;
    palette_from_theme(&theme)
}

/// Copies the comma-separated `keys` that exist in `style`.
pub fn pick_style_keys(style: &Map<String, Value>, keys: &str) -> Map<String, Value> {
    keys.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .filter_map(|key| style.get(key).map(|value| (key.to_string(), value.clone())))
        .collect()
}

/// The alpha table a theme implies for `palette`, relative to `defaults`.
pub fn infer_alpha_table(
    palette: &Palette,
    defaults: &AlphaConfig,
    style: &Map<String, Value>,
) -> AlphaConfig {
    let found = infer_alpha_overrides(palette, defaults, style);
    let mut alpha = AlphaConfig::default();
    alpha.table_mut(palette.meta.appearance()).extend(found);
    alpha
}

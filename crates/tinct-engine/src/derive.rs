//! Derived generators.
//!
//! These expand the palette into structures that are not one-key-one-role
//! copies: the terminal dim palette, vim mode colors, collaborator players,
//! the syntax table and the semantic background tints. All of them only fill
//! keys that are still unset, except the syntax table which merges into an
//! incomplete existing table.

use serde_json::{json, Map, Value};

use crate::color::composite;
use crate::palette::{AlphaConfig, Palette};
use crate::rules::{
    COMPLETE_SYNTAX_ENTRIES, DEFAULT_SELECTION_ALPHA, EDITOR_FALLBACK_BACKGROUNDS,
    SELECTION_ALPHA, SEMANTIC_BACKGROUNDS, SYNTAX_RULES, TERMINAL_DIMS, VIM_KEYS,
};
use crate::style::StyleMap;

/// Copies each ANSI color into its dim slot when the dim slot is unset.
pub fn terminal_dims(style: &mut StyleMap) {
    for (dim, source) in TERMINAL_DIMS {
        if style.get_str(dim).is_some() {
            continue;
        }
        if let Some(color) = style.get_str(source).map(str::to_string) {
            style.insert(*dim, color);
        }
    }
}

/// Fills vim mode colors from the first available role per slot.
pub fn vim(style: &mut StyleMap, palette: &Palette) {
    for (key, slot) in VIM_KEYS {
        style.set_color(key, palette.first_role(slot.preference()));
    }
}

/// Builds one player per accent unless `players` is already set.
pub fn players(style: &mut StyleMap, palette: &Palette, alpha: &AlphaConfig) {
    if style.has_value("players") || palette.accents.is_empty() {
        return;
    }
    let digits = alpha
        .get(palette.meta.appearance(), SELECTION_ALPHA)
        .unwrap_or(DEFAULT_SELECTION_ALPHA);
    let players: Vec<Value> = palette
        .accents
        .iter()
        .filter(|accent| !accent.is_empty())
        .map(|accent| {
            json!({
                "cursor": accent,
                "background": accent,
                "selection": composite(accent, digits),
            })
        })
        .collect();
    if !players.is_empty() {
        style.insert("players", Value::Array(players));
    }
}

/// The syntax table derived from roles alone.
pub fn default_syntax(palette: &Palette) -> Map<String, Value> {
    let mut table = Map::new();
    for rule in SYNTAX_RULES {
        let Some(color) = palette.role(rule.role) else {
            continue;
        };
        let mut entry = Map::new();
        entry.insert("color".into(), Value::String(color.to_string()));
        if let Some(font_style) = rule.font_style {
            entry.insert("font_style".into(), Value::String(font_style.to_string()));
        }
        if let Some(weight) = rule.font_weight {
            entry.insert("font_weight".into(), Value::from(weight));
        }
        table.insert(rule.category.to_string(), Value::Object(entry));
    }
    table
}

/// Fills the syntax table, keeping existing categories.
///
/// An existing table with at least [`COMPLETE_SYNTAX_ENTRIES`] categories is
/// left untouched.
pub fn syntax(style: &mut StyleMap, palette: &Palette) {
    if palette.roles.is_empty() {
        return;
    }
    let existing = style
        .get_value("syntax")
        .and_then(Value::as_object)
        .cloned();
    if let Some(existing) = &existing {
        if existing.len() >= COMPLETE_SYNTAX_ENTRIES {
            return;
        }
    }
    let mut table = default_syntax(palette);
    if let Some(existing) = existing {
        table.extend(existing);
    }
    style.insert("syntax", Value::Object(table));
}

/// Fills `<semantic>.background` keys from the resolved editor background.
///
/// `opaque_editor_bg` is the non-transparent stand-in used by blurred themes;
/// when present it replaces tints for the forced-solid names and is the
/// fallback for the editor-fallback names.
pub fn semantic_backgrounds(
    style: &mut StyleMap,
    palette: &Palette,
    alpha: &AlphaConfig,
    editor_bg: &str,
    opaque_editor_bg: Option<&str>,
) {
    let appearance = palette.meta.appearance();
    for rule in SEMANTIC_BACKGROUNDS {
        let key = format!("{}.background", rule.name);
        if style.has_value(&key) {
            continue;
        }
        if rule.force_solid {
            if let Some(opaque) = opaque_editor_bg {
                style.insert(key, opaque);
                continue;
            }
        }
        let digits = match rule.alpha_key {
            Some(alpha_key) => alpha.get(appearance, alpha_key).unwrap_or_default(),
            None => rule.literal_alpha,
        };
        let value = match style.get_str(rule.name) {
            Some(foreground) => composite(foreground, digits),
            None => editor_bg.to_string(),
        };
        style.insert(key, value);
    }

    let fallback = opaque_editor_bg.unwrap_or(editor_bg);
    for name in EDITOR_FALLBACK_BACKGROUNDS {
        style.set_default(&format!("{name}.background"), fallback);
    }
}

//! The layered style resolver.
//!
//! [`Resolver`] expands a [`Palette`] into a full [`StyleMap`] by running a
//! fixed sequence of layers over a copy of the style template. Each layer
//! either fills keys that are still unset (first concrete write wins) or
//! writes unconditionally:
//!
//! | # | Layer | Writes |
//! |---|-------|--------|
//! | 1 | template skeleton | copy |
//! | 2 | palette `style` fragment | always |
//! | 3 | role mappings, semantics, version control, null keys, role accents | if unset |
//! | 4 | constant (transparent) chrome keys | if unset |
//! | 5 | `background.appearance`, palette `accents` | always |
//! | 6 | raw `colors`, then `terminal` | always |
//! | 7 | terminal dim slots | if unset |
//! | 8 | alpha rules, then `tab.active_background` from `element.active` | same hue / forced |
//! | 9 | vim, players, syntax | if unset |
//! | 10 | palette `overrides` | always |
//! | 11 | gutter, active tab, semantic backgrounds | if unset |
//! | 12 | status/title bar foregrounds from `text` | if unset |
//! | 13 | flat blur: transparent editor and gutter | always |
//! | 14 | remaining chrome keys transparent | if unset |
//! | 15 | pruning to the palette fragment | optional |
//!
//! # Example
//!
//! ```rust
//! use tinct_engine::{AlphaConfig, Palette, Resolver, StyleMap};
//!
//! let palette = Palette::from_json_str(r##"{
//!     "meta": { "appearance": "dark" },
//!     "roles": { "surface": "#1A1B26", "text": "#C0CAF5" },
//!     "alpha": { "dark": { "ui": "E6" } }
//! }"##).unwrap();
//!
//! let template = StyleMap::template_from_json_str(r#"{ "background": "TODO" }"#).unwrap();
//! let style = Resolver::new(&template, &AlphaConfig::default()).resolve(&palette);
//!
//! assert_eq!(style.get_str("background"), Some("#1A1B26E6"));
//! assert_eq!(style.get_str("title_bar.foreground"), Some("#C0CAF5"));
//! ```

use serde_json::Value;
use tracing::debug;

use crate::alpha::apply_alpha_rules;
use crate::color::{composite, TRANSPARENT};
use crate::derive;
use crate::palette::{AlphaConfig, Palette};
use crate::prune::{prune_to, should_prune};
use crate::rules::{
    ACCENT_ROLES, CONST_MAPPINGS, EXTRA_ROLE_KEYS, NULL_KEYS, ROLE_MAPPINGS, SEMANTIC_DEFAULTS,
    SEMANTIC_STYLE_KEYS, TAB_ACTIVE_ALPHA, TRANSPARENT_KEYS,
};
use crate::style::{StyleMap, StyleValue};

/// Resolves palettes against a style template and a shared alpha config.
///
/// The palette's own `alpha` table is overlaid on the shared config for
/// every resolution, so passing an already merged config is harmless.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    template: &'a StyleMap,
    alpha: &'a AlphaConfig,
    prune: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(template: &'a StyleMap, alpha: &'a AlphaConfig) -> Self {
        Self {
            template,
            alpha,
            prune: true,
        }
    }

    /// Enables or disables pruning to the palette's `style` fragment.
    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Runs every layer and returns the resolved style.
    pub fn resolve(&self, palette: &Palette) -> StyleMap {
        let palette = &palette.with_uppercase_hues();
        let alpha = palette.effective_alpha(self.alpha);
        let mut style = self.template.clone();
        debug!(keys = style.len(), "template");

        style.merge_json(&palette.style);
        apply_roles(&mut style, palette);
        debug!(keys = style.len(), "roles and semantics");

        for (key, value) in CONST_MAPPINGS {
            style.set_default(key, *value);
        }

        if !palette.meta.background_appearance.is_empty() {
            style.insert(
                "background.appearance",
                palette.meta.background_appearance.as_str(),
            );
        }
        if !palette.accents.is_empty() {
            style.insert("accents", accent_array(palette.accents.iter()));
        }

        style.merge_strings(&palette.colors);
        style.merge_strings(&palette.terminal);
        derive::terminal_dims(&mut style);
        debug!(keys = style.len(), "raw colors and terminal");

        apply_alpha_rules(&mut style, palette, &alpha);
        if let Some(active) = style.get_str("element.active").map(str::to_string) {
            style.set_default("tab.active_background", active);
        }
        debug!(keys = style.len(), "alpha rules");

        derive::vim(&mut style, palette);
        derive::players(&mut style, palette, &alpha);
        derive::syntax(&mut style, palette);
        debug!(keys = style.len(), "derived tables");

        style.merge_json(&palette.overrides);

        if let Some(editor_bg) = style.get_str("editor.background").map(str::to_string) {
            let opaque = palette.meta.is_blurred().then_some(editor_bg.as_str());
            style.set_default("editor.gutter.background", editor_bg.as_str());
            let tab_active = match alpha.get(palette.meta.appearance(), TAB_ACTIVE_ALPHA) {
                Some(digits) => composite(&editor_bg, digits),
                None => editor_bg.clone(),
            };
            style.set_default("tab.active_background", tab_active);
            derive::semantic_backgrounds(&mut style, palette, &alpha, &editor_bg, opaque);
        }

        if let Some(text) = style.get_str("text").map(str::to_string) {
            style.set_default("status_bar.foreground", text.as_str());
            style.set_default("title_bar.foreground", text.as_str());
        }

        if palette.meta.is_flat_blur() {
            style.insert("editor.background", TRANSPARENT);
            style.insert("editor.gutter.background", TRANSPARENT);
        }
        style.set_defaults(TRANSPARENT_KEYS, TRANSPARENT);

        if self.prune && should_prune(&palette.style) {
            prune_to(&mut style, &palette.style);
            debug!(keys = style.len(), "pruned to palette fragment");
        }
        debug!(keys = style.len(), "resolved");
        style
    }
}

fn accent_array<'s>(accents: impl Iterator<Item = &'s String>) -> Value {
    Value::Array(accents.map(|a| Value::String(a.clone())).collect())
}

/// Layer 3. Does nothing for a palette without roles.
fn apply_roles(style: &mut StyleMap, palette: &Palette) {
    if palette.roles.is_empty() {
        return;
    }
    for mapping in ROLE_MAPPINGS.iter().chain(EXTRA_ROLE_KEYS) {
        style.set_color(mapping.key, palette.role(mapping.role));
    }

    let names = SEMANTIC_DEFAULTS
        .iter()
        .map(|(name, _)| *name)
        .chain(palette.semantic.keys().map(String::as_str));
    for name in names {
        let color = palette.semantic_color(name);
        style.set_color(name, color.as_deref());
        style.set_color(&format!("{name}.border"), color.as_deref());
    }

    for (key, chain) in SEMANTIC_STYLE_KEYS {
        let color = chain.iter().find_map(|name| palette.semantic_color(name));
        style.set_color(key, color.as_deref());
    }

    for key in NULL_KEYS {
        style.set_default(key, StyleValue::Value(Value::Null));
    }

    if palette.accents.is_empty() {
        let accents: Vec<String> = ACCENT_ROLES
            .iter()
            .filter_map(|role| palette.role(role))
            .map(str::to_string)
            .collect();
        if !accents.is_empty() {
            style.set_default("accents", accent_array(accents.iter()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template() -> StyleMap {
        StyleMap::template_from_json_str(
            r#"{"background": "TODO", "editor.background": "TODO", "text": "TODO", "custom.key": "TODO"}"#,
        )
        .unwrap()
    }

    fn palette() -> Palette {
        Palette::from_json_str(
            r##"{
                "meta": {"name": "Night", "appearance": "dark"},
                "roles": {
                    "surface": "#1A1B26", "overlay": "#24283B", "text": "#C0CAF5",
                    "muted": "#565F89", "subtle": "#9AA5CE", "foam": "#7DCFFF",
                    "pine": "#2AC3DE", "rose": "#BB9AF7", "gold": "#E0AF68",
                    "iris": "#7AA2F7", "love": "#F7768E",
                    "highlight_low": "#292E42", "highlight_med": "#33467C",
                    "highlight_high": "#414868"
                },
                "alpha": {"dark": {"ui": "E6"}}
            }"##,
        )
        .unwrap()
    }

    fn resolve(palette: &Palette) -> StyleMap {
        Resolver::new(&template(), &AlphaConfig::default()).resolve(palette)
    }

    #[test]
    fn test_role_and_alpha_layers() {
        let style = resolve(&palette());
        assert_eq!(style.get_str("background"), Some("#1A1B26E6"));
        assert_eq!(style.get_str("editor.background"), Some("#1A1B26"));
        assert_eq!(style.get_str("text"), Some("#C0CAF5"));
        assert!(style.is_unset("custom.key"));
        assert!(style.contains_key("custom.key"));
    }

    #[test]
    fn test_semantics_and_version_control() {
        let mut palette = palette();
        palette.semantic.insert("warning".into(), "love".into());
        palette.semantic.insert("custom".into(), "#123456".into());
        let style = resolve(&palette);
        assert_eq!(style.get_str("warning"), Some("#F7768E"));
        assert_eq!(style.get_str("warning.border"), Some("#F7768E"));
        assert_eq!(style.get_str("custom"), Some("#123456"));
        assert_eq!(style.get_str("version_control.added"), Some("#7DCFFF"));
        assert_eq!(style.get_str("version_control.conflict"), Some("#E0AF68"));
        assert_eq!(style.get_str("version_control.conflict_marker.ours"), Some("#F7768E"));
        assert_eq!(style.get_str("debugger.accent"), Some("#F7768E"));
        assert_eq!(style.get_value("scrollbar.thumb.border"), Some(&Value::Null));
    }

    #[test]
    fn test_role_accents_when_palette_has_none() {
        let style = resolve(&palette());
        assert_eq!(
            style.get_value("accents"),
            Some(&json!(["#7DCFFF", "#7AA2F7", "#2AC3DE", "#BB9AF7", "#E0AF68", "#F7768E"]))
        );

        let mut palette = palette();
        palette.accents = vec!["#FF0000".into()];
        let style = resolve(&palette);
        assert_eq!(style.get_value("accents"), Some(&json!(["#FF0000"])));
        assert_eq!(style.get_value("players").unwrap()[0]["selection"], "#FF00004D");
    }

    #[test]
    fn test_no_roles_skips_role_layers() {
        let palette = Palette::default();
        let style = resolve(&palette);
        assert!(style.is_unset("background"));
        assert!(style.is_unset("text"));
        assert!(!style.contains_key("syntax"));
        assert_eq!(style.get_str("border"), Some(TRANSPARENT));
        assert_eq!(style.get_str("panel.background"), Some(TRANSPARENT));
    }

    #[test]
    fn test_fragment_and_overrides() {
        let mut palette = palette();
        palette.style.insert("text".into(), json!("#EEEEEE"));
        palette.overrides.insert("background".into(), json!("#000000"));
        palette.overrides.insert("custom.key".into(), json!("#ABCDEF"));
        let style = Resolver::new(&template(), &AlphaConfig::default())
            .prune(false)
            .resolve(&palette);
        assert_eq!(style.get_str("text"), Some("#EEEEEE"));
        // the role mapping fills the bar foregrounds before the fragment's text is consulted
        assert_eq!(style.get_str("status_bar.foreground"), Some("#C0CAF5"));
        assert_eq!(style.get_str("background"), Some("#000000"));
        assert_eq!(style.get_str("custom.key"), Some("#ABCDEF"));
    }

    #[test]
    fn test_text_fixup_fills_bar_foregrounds() {
        let mut palette = palette();
        palette.roles.remove("text");
        palette.style.insert("text".into(), json!("#EEEEEE"));
        let style = Resolver::new(&template(), &AlphaConfig::default())
            .prune(false)
            .resolve(&palette);
        assert_eq!(style.get_str("status_bar.foreground"), Some("#EEEEEE"));
        assert_eq!(style.get_str("title_bar.foreground"), Some("#EEEEEE"));
    }

    #[test]
    fn test_hue_sources_resolve_uppercase() {
        let mut palette = palette();
        palette.roles.insert("surface".into(), "#1a1b26".into());
        palette.roles.insert("text".into(), "#c0caf5".into());
        palette.semantic.insert("custom".into(), "#abcdef".into());
        palette.accents = vec!["#ff0000".into()];
        let style = resolve(&palette);
        assert_eq!(style.get_str("editor.background"), Some("#1A1B26"));
        assert_eq!(style.get_str("background"), Some("#1A1B26E6"));
        assert_eq!(style.get_str("text"), Some("#C0CAF5"));
        assert_eq!(style.get_str("custom"), Some("#ABCDEF"));
        assert_eq!(style.get_value("accents"), Some(&json!(["#FF0000"])));
        assert_eq!(style.get_value("players").unwrap()[0]["cursor"], "#FF0000");
    }

    #[test]
    fn test_colors_then_terminal_verbatim() {
        let mut palette = palette();
        palette.colors.insert("terminal.ansi.red".into(), "#aa0000".into());
        palette.terminal.insert("terminal.ansi.red".into(), "#bb0000".into());
        let style = resolve(&palette);
        assert_eq!(style.get_str("terminal.ansi.red"), Some("#bb0000"));
        assert_eq!(style.get_str("terminal.ansi.dim_red"), Some("#bb0000"));
    }

    #[test]
    fn test_tab_active_from_element_active() {
        let mut palette = palette();
        palette.alpha.dark.insert("element_active".into(), "80".into());
        let style = resolve(&palette);
        assert_eq!(style.get_str("element.active"), Some("#33467C80"));
        // the role mapping fills tab.active_background with surface first
        assert_eq!(style.get_str("tab.active_background"), Some("#1A1B26"));

        palette.roles.retain(|role, _| role == "highlight_med");
        let style = resolve(&palette);
        assert_eq!(style.get_str("tab.active_background"), Some("#33467C80"));
    }

    #[test]
    fn test_tab_active_from_editor_background() {
        let mut palette = palette();
        palette.roles.remove("surface");
        palette.roles.remove("highlight_med");
        palette.colors.insert("editor.background".into(), "#101010".into());
        palette.alpha.dark.insert("tab_active".into(), "CC".into());
        let style = resolve(&palette);
        assert_eq!(style.get_str("tab.active_background"), Some("#101010CC"));
        assert_eq!(style.get_str("editor.gutter.background"), Some("#101010"));
        assert_eq!(style.get_str("error.background"), Some("#101010"));
    }

    #[test]
    fn test_flat_blur_runs_after_fixups() {
        let mut palette = palette();
        palette.meta.background_appearance = "blurred".into();
        palette.meta.blur_mode = "flat".into();
        let style = resolve(&palette);
        assert_eq!(style.get_str("background.appearance"), Some("blurred"));
        assert_eq!(style.get_str("editor.background"), Some(TRANSPARENT));
        assert_eq!(style.get_str("editor.gutter.background"), Some(TRANSPARENT));
        assert_eq!(style.get_str("warning.background"), Some("#1A1B26"));
        assert_eq!(style.get_str("hint.background"), Some("#1A1B26"));
    }

    #[test]
    fn test_pruning_to_fragment() {
        let mut palette = palette();
        palette.style.insert("background".into(), json!("#1A1B26E6"));
        palette.style.insert("text".into(), json!("#C0CAF5"));
        let style = resolve(&palette);
        let keys: Vec<&str> = style.keys().collect();
        assert_eq!(keys, vec!["background", "text"]);

        let unpruned = Resolver::new(&template(), &AlphaConfig::default())
            .prune(false)
            .resolve(&palette);
        assert!(unpruned.len() > 2);
    }

    #[test]
    fn test_shared_alpha_overlaid_by_palette() {
        let mut shared = AlphaConfig::default();
        shared.dark.insert("ui".into(), "80".into());
        shared.dark.insert("surface".into(), "F0".into());
        let style = Resolver::new(&template(), &shared).resolve(&palette());
        assert_eq!(style.get_str("background"), Some("#1A1B26E6"));
        assert_eq!(style.get_str("surface.background"), Some("#1A1B26F0"));
    }
}

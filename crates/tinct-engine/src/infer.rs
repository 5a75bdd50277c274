//! Inferring palette changes from a reference theme.
//!
//! Given a reference style and the diff between it and a generated style, the
//! inferencer updates a copy of the palette so that regenerating gets closer
//! to the reference:
//!
//! - **Overrides** pin the reference value of every missing or changed key,
//!   except `syntax`/`players` (stored in the palette's `style` fragment) and
//!   standardized keys (never pinned).
//! - **Alpha** inverts the compositor for each alpha rule and records the
//!   digits that differ from the effective default.
//! - **Alpha pruning** drops literal overrides of alpha-derived keys that the
//!   updated alpha table now reproduces on its own.
//!
//! ```rust
//! use serde_json::json;
//! use tinct_engine::{AlphaConfig, InferOptions, Inferencer, Palette, Resolver, StyleDiff, StyleMap};
//!
//! let palette = Palette::from_json_str(r##"{
//!     "meta": { "appearance": "dark" },
//!     "roles": { "surface": "#1A1B26" }
//! }"##).unwrap();
//! let template = StyleMap::template_from_json_str(r#"{ "background": "TODO" }"#).unwrap();
//! let alpha = AlphaConfig::default();
//! let reference = json!({ "background": "#1A1B26E6" }).as_object().unwrap().clone();
//!
//! let generated = Resolver::new(&template, &alpha).resolve(&palette).to_json(false);
//! let diff = StyleDiff::between(&reference, &generated);
//!
//! let options = InferOptions { write_alpha: true, ..InferOptions::default() };
//! let updated = Inferencer::new(&template, &alpha, &reference).apply(&palette, &diff, &options);
//!
//! assert_eq!(updated.alpha.dark.get("ui").map(String::as_str), Some("E6"));
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::color::{infer_alpha, strip_alpha};
use crate::diff::StyleDiff;
use crate::palette::{AlphaConfig, Palette};
use crate::resolve::Resolver;
use crate::rules::{
    alpha_derived_keys, is_standardized_key, ALPHA_RULES, DEFAULT_SELECTION_ALPHA,
    SELECTION_ALPHA,
};
use crate::style::StyleMap;

fn has_alpha(color: &str) -> bool {
    strip_alpha(color) != color
}

/// Style keys stored in the palette fragment rather than as overrides.
const FRAGMENT_KEYS: &[&str] = &["syntax", "players"];

/// Which palette sections the inferencer may rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InferOptions {
    pub write_overrides: bool,
    /// Start from empty overrides. Only meaningful with `write_overrides`.
    pub rewrite_overrides: bool,
    pub write_alpha: bool,
    pub prune_alpha: bool,
}

impl InferOptions {
    /// Whether applying these options can change a palette at all.
    pub fn writes_anything(&self) -> bool {
        self.write_overrides || self.write_alpha || self.prune_alpha
    }
}

/// Updates palettes to match one reference style.
#[derive(Debug, Clone)]
pub struct Inferencer<'a> {
    template: &'a StyleMap,
    alpha: &'a AlphaConfig,
    reference: &'a Map<String, Value>,
}

impl<'a> Inferencer<'a> {
    /// `alpha` is the effective config the palette was generated with; its
    /// values are the defaults inferred alpha is compared against.
    pub fn new(
        template: &'a StyleMap,
        alpha: &'a AlphaConfig,
        reference: &'a Map<String, Value>,
    ) -> Self {
        Self {
            template,
            alpha,
            reference,
        }
    }

    /// Returns an updated copy of `palette`.
    pub fn apply(&self, palette: &Palette, diff: &StyleDiff, options: &InferOptions) -> Palette {
        let mut updated = palette.clone();
        if options.write_overrides {
            apply_style_overrides(
                &mut updated,
                diff,
                self.reference,
                options.rewrite_overrides,
            );
        }
        if options.write_alpha {
            apply_alpha_overrides(&mut updated, self.alpha, self.reference);
        }
        if options.prune_alpha {
            prune_alpha_overrides(&mut updated, self.template, self.alpha, self.reference);
        }
        updated
    }
}

/// Pins the reference value of every unmatched key.
pub fn apply_style_overrides(
    palette: &mut Palette,
    diff: &StyleDiff,
    reference: &Map<String, Value>,
    rewrite: bool,
) {
    if rewrite {
        palette.overrides.clear();
    }
    let mut pinned = 0usize;
    for key in diff.unmatched() {
        let Some(value) = reference.get(key) else {
            continue;
        };
        if FRAGMENT_KEYS.contains(&key) {
            palette.style.insert(key.to_string(), value.clone());
        } else if is_standardized_key(key) {
            debug!(key, "not pinning standardized key");
        } else {
            palette.overrides.insert(key.to_string(), value.clone());
            pinned += 1;
        }
    }
    info!(pinned, rewrite, "wrote style overrides");
}

/// The selection alpha used by the reference's players.
///
/// The first player whose `selection` composites over its `background` (or
/// `cursor` when it has no background) decides.
pub fn infer_selection_alpha(reference: &Map<String, Value>) -> Option<String> {
    let players = reference.get("players")?.as_array()?;
    players.iter().find_map(|player| {
        let player = player.as_object()?;
        let non_empty = |key: &str| player.get(key)?.as_str().filter(|s| !s.is_empty());
        let base = non_empty("background").or_else(|| non_empty("cursor"))?;
        infer_alpha(non_empty("selection")?, base)
    })
}

/// Alpha digits the reference implies that differ from `defaults`.
///
/// Within one alpha key, the last style key that yields a differing value
/// wins. A reference value without an alpha channel only yields `FF` when
/// the key has a configured default to override.
pub fn infer_alpha_overrides(
    palette: &Palette,
    defaults: &AlphaConfig,
    reference: &Map<String, Value>,
) -> BTreeMap<String, String> {
    let appearance = palette.meta.appearance();
    let is_default = |key: &str, digits: &str| {
        defaults
            .get(appearance, key)
            .is_some_and(|d| d.eq_ignore_ascii_case(digits))
    };

    let mut found = BTreeMap::new();
    for rule in ALPHA_RULES {
        let Some(base) = rule.base_color(palette) else {
            continue;
        };
        for key in rule.style_keys {
            let Some(value) = reference
                .get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
            else {
                continue;
            };
            let Some(digits) = infer_alpha(value, &base) else {
                continue;
            };
            if is_default(rule.alpha_key, &digits) {
                continue;
            }
            // An opaque reference value is already what an unconfigured key produces.
            if !has_alpha(value) && defaults.get(appearance, rule.alpha_key).is_none() {
                continue;
            }
            found.insert(rule.alpha_key.to_string(), digits);
        }
    }

    if let Some(digits) = infer_selection_alpha(reference) {
        let default = defaults
            .get(appearance, SELECTION_ALPHA)
            .unwrap_or(DEFAULT_SELECTION_ALPHA);
        if !default.eq_ignore_ascii_case(&digits) {
            found.insert(SELECTION_ALPHA.to_string(), digits);
        }
    }
    found
}

/// Writes inferred alpha into the palette's table for its appearance.
pub fn apply_alpha_overrides(
    palette: &mut Palette,
    defaults: &AlphaConfig,
    reference: &Map<String, Value>,
) {
    let found = infer_alpha_overrides(palette, defaults, reference);
    info!(keys = found.len(), "inferred alpha overrides");
    let appearance = palette.meta.appearance();
    palette.alpha.table_mut(appearance).extend(found);
}

/// Drops alpha-derived overrides that regeneration reproduces without them.
pub fn prune_alpha_overrides(
    palette: &mut Palette,
    template: &StyleMap,
    alpha: &AlphaConfig,
    reference: &Map<String, Value>,
) {
    if palette.overrides.is_empty() {
        return;
    }
    let alpha_keys = alpha_derived_keys();
    let mut candidate = palette.clone();
    for key in &alpha_keys {
        candidate.overrides.remove(*key);
    }
    let regenerated = Resolver::new(template, alpha)
        .prune(false)
        .resolve(&candidate);

    let before = palette.overrides.len();
    for key in alpha_keys {
        let Some(expected) = reference.get(key) else {
            continue;
        };
        if regenerated.get_value(key) == Some(expected) {
            palette.overrides.remove(key);
        }
    }
    info!(
        removed = before - palette.overrides.len(),
        "pruned alpha-derived overrides"
    );
}

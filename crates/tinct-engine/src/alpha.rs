//! Alpha rule application.
//!
//! Each [`AlphaRule`] composites a base color (a role, a semantic name, or a
//! raw terminal slot) with the alpha digits configured for the palette's
//! appearance and writes the result to its style keys.
//!
//! A non-forced rule only replaces a concrete value when that value has the
//! same hue as the base: it re-tints a role color the mapping layer put there,
//! but leaves an unrelated hand-picked color alone. Forced rules (terminal
//! backgrounds) always write.

use tracing::trace;

use crate::color::{composite, same_hue};
use crate::palette::{AlphaConfig, Palette};
use crate::rules::{AlphaBase, AlphaRule, ALPHA_RULES};
use crate::style::StyleMap;

impl AlphaRule {
    /// The base color this rule composites, under `palette`.
    pub fn base_color(&self, palette: &Palette) -> Option<String> {
        let color = match self.base {
            AlphaBase::Role(role) => palette.role_opaque(role),
            AlphaBase::Semantic(name) => palette.semantic_color(name),
            AlphaBase::Terminal(key) => palette.terminal_opaque(key),
        };
        color.filter(|c| !c.is_empty())
    }
}

/// Applies every rule of [`ALPHA_RULES`] to `style`.
pub fn apply_alpha_rules(style: &mut StyleMap, palette: &Palette, alpha: &AlphaConfig) {
    let appearance = palette.meta.appearance();
    for rule in ALPHA_RULES {
        let Some(digits) = alpha.get(appearance, rule.alpha_key) else {
            continue;
        };
        let Some(base) = rule.base_color(palette) else {
            trace!(alpha_key = rule.alpha_key, "alpha rule has no base color");
            continue;
        };
        for key in rule.style_keys {
            if let Some(current) = style.get_str(key) {
                if !rule.force && !same_hue(current, &base) {
                    trace!(key, current, "keeping unrelated color");
                    continue;
                }
            }
            style.insert(*key, composite(&base, digits));
        }
    }
}

//! The palette: the compact, role-based input to theme generation.
//!
//! A palette names a handful of hues ("roles" such as `surface`, `foam`,
//! `love`), optionally remaps semantic meanings onto them, and carries the
//! escape hatches used to match an existing theme exactly: raw color maps, an
//! embedded pre-resolved style fragment, literal overrides and a
//! per-appearance alpha table.
//!
//! # Example
//!
//! ```rust
//! use tinct_engine::{Appearance, Palette};
//!
//! let palette = Palette::from_json_str(r##"{
//!     "meta": { "name": "Night", "appearance": "dark" },
//!     "roles": { "surface": "#1A1B26", "love": "#F7768E" },
//!     "semantic": { "warning": "love" },
//!     "alpha": { "dark": { "ui": "E6" } }
//! }"##).unwrap();
//!
//! assert_eq!(palette.meta.appearance(), Appearance::Dark);
//! assert_eq!(palette.semantic_color("warning").as_deref(), Some("#F7768E"));
//! assert_eq!(palette.semantic_color("error").as_deref(), Some("#F7768E"));
//! ```
//!
//! Every field is optional and a JSON `null` reads as empty, so palettes
//! written by older tools load unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::color::{normalize, strip_alpha};
use crate::error::{DocumentKind, Error, Result};
use crate::rules::SEMANTIC_DEFAULTS;

/// Blur mode that renders the editor area fully transparent.
pub const BLUR_MODE_FLAT: &str = "flat";

/// Background appearance that asks the host for a blurred window.
pub const BACKGROUND_BLURRED: &str = "blurred";

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Light or dark variant selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    /// Reads an appearance string. Anything other than "light" is dark.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("light") {
            Appearance::Light
        } else {
            Appearance::Dark
        }
    }
}

/// Descriptive metadata copied into the generated theme document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub appearance: String,
    #[serde(deserialize_with = "null_as_default")]
    pub theme_name: String,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub background_appearance: String,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub blur_mode: String,
}

impl Meta {
    pub fn appearance(&self) -> Appearance {
        Appearance::parse(&self.appearance)
    }

    /// Whether the editor area should be rendered fully transparent.
    pub fn is_flat_blur(&self) -> bool {
        self.blur_mode.eq_ignore_ascii_case(BLUR_MODE_FLAT)
    }

    /// Whether the host window is blurred behind the theme.
    pub fn is_blurred(&self) -> bool {
        self.background_appearance
            .eq_ignore_ascii_case(BACKGROUND_BLURRED)
    }
}

/// Per-appearance alpha digits, keyed by alpha-key name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaConfig {
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub light: BTreeMap<String, String>,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub dark: BTreeMap<String, String>,
}

impl AlphaConfig {
    /// Parses an alpha config document.
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(Error::parse(DocumentKind::AlphaConfig))
    }

    pub fn is_empty(&self) -> bool {
        self.light.is_empty() && self.dark.is_empty()
    }

    /// The table used for `appearance`.
    pub fn table(&self, appearance: Appearance) -> &BTreeMap<String, String> {
        match appearance {
            Appearance::Light => &self.light,
            Appearance::Dark => &self.dark,
        }
    }

    pub fn table_mut(&mut self, appearance: Appearance) -> &mut BTreeMap<String, String> {
        match appearance {
            Appearance::Light => &mut self.light,
            Appearance::Dark => &mut self.dark,
        }
    }

    /// Looks up alpha digits; empty values count as absent.
    pub fn get(&self, appearance: Appearance, key: &str) -> Option<&str> {
        self.table(appearance)
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Overlays `other` onto `self`. Empty values in `other` never overwrite.
    pub fn merge(&mut self, other: &AlphaConfig) {
        for (key, value) in &other.light {
            if !value.is_empty() {
                self.light.insert(key.clone(), value.clone());
            }
        }
        for (key, value) in &other.dark {
            if !value.is_empty() {
                self.dark.insert(key.clone(), value.clone());
            }
        }
    }

    /// Returns `base` with `local` overlaid.
    pub fn merged(base: &AlphaConfig, local: &AlphaConfig) -> AlphaConfig {
        let mut out = base.clone();
        out.merge(local);
        out
    }
}

/// The role-based description a theme is generated from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub meta: Meta,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub roles: BTreeMap<String, String>,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub semantic: BTreeMap<String, String>,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub accents: Vec<String>,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub colors: BTreeMap<String, String>,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub terminal: BTreeMap<String, String>,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub style: Map<String, Value>,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub overrides: Map<String, Value>,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "AlphaConfig::is_empty"
    )]
    pub alpha: AlphaConfig,
}

impl Palette {
    /// Parses a palette document.
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(Error::parse(DocumentKind::Palette))
    }

    /// The color of a role, if the palette defines a non-empty one.
    pub fn role(&self, name: &str) -> Option<&str> {
        self.roles
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// A role color with any alpha channel removed.
    pub fn role_opaque(&self, name: &str) -> Option<String> {
        self.role(name).map(strip_alpha)
    }

    /// First role in `names` that the palette defines.
    pub fn first_role(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.role(name))
    }

    /// Resolves a semantic name to a color.
    ///
    /// Palette `semantic` entries win over the built-in defaults. An entry
    /// that is not a `#` color is treated as a role alias.
    pub fn semantic_color(&self, name: &str) -> Option<String> {
        if let Some(value) = self.semantic.get(name) {
            if value.is_empty() || value.starts_with('#') {
                return Some(value.clone()).filter(|v| !v.is_empty());
            }
            return self.role(value).map(str::to_string);
        }
        SEMANTIC_DEFAULTS
            .iter()
            .find(|(semantic, _)| *semantic == name)
            .and_then(|(_, role)| self.role(role))
            .map(str::to_string)
    }

    /// A raw terminal color with any alpha channel removed.
    pub fn terminal_opaque(&self, key: &str) -> Option<String> {
        self.terminal
            .get(key)
            .filter(|v| !v.is_empty())
            .map(|v| strip_alpha(v))
    }

    /// A copy with role, literal semantic and accent colors uppercased.
    ///
    /// Raw `colors`, `terminal`, `style` and `overrides` are left as written.
    pub fn with_uppercase_hues(&self) -> Palette {
        let mut palette = self.clone();
        for color in palette.roles.values_mut() {
            *color = normalize(color);
        }
        for value in palette.semantic.values_mut() {
            if value.starts_with('#') {
                *value = normalize(value);
            }
        }
        for accent in &mut palette.accents {
            *accent = normalize(accent);
        }
        palette
    }

    /// The alpha config in effect for this palette on top of `base`.
    pub fn effective_alpha(&self, base: &AlphaConfig) -> AlphaConfig {
        AlphaConfig::merged(base, &self.alpha)
    }
}

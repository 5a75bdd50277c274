//! # Tinct Engine - Palette-Driven Editor Theme Resolution
//!
//! `tinct-engine` turns a compact, role-based [`Palette`] into a complete,
//! densely keyed editor theme style, and runs the transformation backwards:
//! given a reference theme, it works out which overrides and alpha values a
//! palette needs to reproduce it.
//!
//! The crate is pure. It never touches the filesystem; every entry point takes
//! and returns in-memory documents. The `tinct` command-line tool wraps it.
//!
//! ## Core Concepts
//!
//! - [`Palette`]: roles (named hues), semantic remaps, accents, raw color maps,
//!   an embedded style fragment, overrides and an [`AlphaConfig`]
//! - [`StyleMap`]: the flat key/value style being resolved, where
//!   [`StyleValue::Unset`] marks keys any layer may still fill
//! - [`Resolver`]: runs the ordered resolution layers
//! - [`StyleDiff`]: missing / extra / changed keys against a reference
//! - [`Inferencer`]: writes overrides and alpha back into a palette
//! - [`color`]: the hex + alpha compositing math
//!
//! ## Quick Start
//!
//! ```rust
//! use tinct_engine::{AlphaConfig, Palette, Resolver, StyleMap, ThemeDocument};
//!
//! let palette = Palette::from_json_str(r##"{
//!     "meta": { "name": "Night", "appearance": "dark" },
//!     "roles": { "surface": "#1A1B26", "text": "#C0CAF5", "love": "#F7768E" }
//! }"##).unwrap();
//!
//! let mut alpha = AlphaConfig::default();
//! alpha.dark.insert("ui".into(), "E6".into());
//!
//! let template = StyleMap::template_from_json_str(r#"{ "background": "TODO" }"#).unwrap();
//! let style = Resolver::new(&template, &alpha).resolve(&palette);
//!
//! assert_eq!(style.get_str("background"), Some("#1A1B26E6"));
//! assert_eq!(style.get_str("error"), Some("#F7768E"));
//!
//! let document = ThemeDocument::from_style(&palette, &style, false, false);
//! assert_eq!(document.themes[0].style["text"], "#C0CAF5");
//! ```
//!
//! ## Matching a Reference Theme
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
//! let reference = json!({ "background": "#1A1B26E6", "panel.background": "#123456" })
//!     .as_object()
//!     .unwrap()
//!     .clone();
//!
//! let generated = Resolver::new(&template, &alpha).resolve(&palette).to_json(false);
//! let diff = StyleDiff::between(&reference, &generated);
//! assert_eq!(diff.changed, vec!["background", "panel.background"]);
//!
//! let options = InferOptions { write_overrides: true, write_alpha: true, prune_alpha: true, ..Default::default() };
//! let updated = Inferencer::new(&template, &alpha, &reference).apply(&palette, &diff, &options);
//!
//! let regenerated = Resolver::new(&template, &alpha).resolve(&updated).to_json(false);
//! assert!(StyleDiff::between(&reference, &regenerated).converged());
//! assert!(!updated.overrides.contains_key("background"));
//! ```

pub mod alpha;
pub mod color;
pub mod derive;
pub mod diff;
pub mod document;
mod error;
pub mod extract;
pub mod infer;
pub mod palette;
pub mod prune;
pub mod resolve;
pub mod rules;
pub mod style;

// Error type
pub use error::{DocumentKind, Error, Result};

// Data model
pub use palette::{Appearance, AlphaConfig, Meta, Palette};
pub use style::{StyleMap, StyleValue, UNSET_MARKER};

// Resolution
pub use resolve::Resolver;

// Reverse direction
pub use diff::StyleDiff;
pub use infer::{InferOptions, Inferencer};

// Documents
pub use document::{
    reference_from_json_str, reference_style, with_wip_suffix, ThemeDocument, ThemeEntry,
    SCHEMA_URL, WIP_SUFFIX,
};

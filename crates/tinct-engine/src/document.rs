//! Theme document shapes.
//!
//! The generated document wraps one resolved style in the consuming editor's
//! theme-family envelope. Reference documents have the same shape; only
//! `themes[0].style` is read from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DocumentKind, Error, Result};
use crate::palette::Palette;
use crate::style::StyleMap;

pub const SCHEMA_URL: &str = "https://zed.dev/schema/themes/v0.2.0.json";

/// Appended to display names of work-in-progress themes.
pub const WIP_SUFFIX: &str = " (WIP)";

/// Appends [`WIP_SUFFIX`] once. Empty names stay empty.
pub fn with_wip_suffix(name: &str) -> String {
    if name.is_empty() || name.ends_with(WIP_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{WIP_SUFFIX}")
    }
}

/// A theme family document holding one theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    pub author: String,
    pub themes: Vec<ThemeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeEntry {
    pub appearance: String,
    pub name: String,
    pub style: Map<String, Value>,
}

impl ThemeDocument {
    /// Wraps an already-finalized style in the document envelope.
    pub fn build(palette: &Palette, style: Map<String, Value>, wip: bool) -> Self {
        let meta = &palette.meta;
        let (name, theme_name) = if wip {
            (with_wip_suffix(&meta.name), with_wip_suffix(&meta.theme_name))
        } else {
            (meta.name.clone(), meta.theme_name.clone())
        };
        Self {
            schema: SCHEMA_URL.to_string(),
            name,
            author: meta.author.clone(),
            themes: vec![ThemeEntry {
                appearance: meta.appearance.clone(),
                name: theme_name,
                style,
            }],
        }
    }

    /// Like [`build`](Self::build), converting a resolved style map.
    pub fn from_style(palette: &Palette, style: &StyleMap, keep_unset: bool, wip: bool) -> Self {
        Self::build(palette, style.to_json(keep_unset), wip)
    }
}

/// Extracts `themes[0].style` from a theme document.
pub fn reference_style(document: &Value) -> Result<Map<String, Value>> {
    let themes = document
        .get("themes")
        .and_then(Value::as_array)
        .filter(|themes| !themes.is_empty())
        .ok_or(Error::InvalidTheme("missing themes array"))?;
    let first = themes[0]
        .as_object()
        .ok_or(Error::InvalidTheme("themes[0] not object"))?;
    first
        .get("style")
        .and_then(Value::as_object)
        .cloned()
        .ok_or(Error::InvalidTheme("missing style map"))
}

/// Parses a reference theme document and extracts its style.
pub fn reference_from_json_str(input: &str) -> Result<Map<String, Value>> {
    let document: Value =
        serde_json::from_str(input).map_err(Error::parse(DocumentKind::Reference))?;
    reference_style(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn palette() -> Palette {
        let mut palette = Palette::default();
        palette.meta.name = "Night".into();
        palette.meta.theme_name = "Night Dark".into();
        palette.meta.author = "me".into();
        palette.meta.appearance = "dark".into();
        palette
    }

    #[test]
    fn test_wip_suffix_once() {
        assert_eq!(with_wip_suffix("Night"), "Night (WIP)");
        assert_eq!(with_wip_suffix("Night (WIP)"), "Night (WIP)");
        assert_eq!(with_wip_suffix(""), "");
    }

    #[test]
    fn test_build_document_shape() {
        let mut style = Map::new();
        style.insert("background".into(), json!("#1A1B26"));
        let document = ThemeDocument::build(&palette(), style, true);
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({
                "$schema": SCHEMA_URL,
                "name": "Night (WIP)",
                "author": "me",
                "themes": [{
                    "appearance": "dark",
                    "name": "Night Dark (WIP)",
                    "style": {"background": "#1A1B26"}
                }]
            })
        );
    }

    #[test]
    fn test_from_style_strips_unset() {
        let style = StyleMap::template_from_json_str(r##"{"a": "TODO", "b": "#000000"}"##).unwrap();
        let document = ThemeDocument::from_style(&palette(), &style, false, false);
        assert_eq!(document.name, "Night");
        assert_eq!(Value::Object(document.themes[0].style.clone()), json!({"b": "#000000"}));
    }

    #[test]
    fn test_reference_style() {
        let style = reference_from_json_str(
            r##"{"themes": [{"style": {"background": "#000000"}}, {"style": {}}]}"##,
        )
        .unwrap();
        assert_eq!(style.get("background"), Some(&json!("#000000")));
    }

    #[test]
    fn test_reference_errors() {
        let cases = [
            (json!({}), "missing themes array"),
            (json!({"themes": []}), "missing themes array"),
            (json!({"themes": [1]}), "themes[0] not object"),
            (json!({"themes": [{"name": "x"}]}), "missing style map"),
        ];
        for (document, reason) in cases {
            let err = reference_style(&document).unwrap_err();
            assert_eq!(err.to_string(), format!("invalid theme: {reason}"));
        }
        let err = reference_from_json_str("{").unwrap_err();
        assert!(err.to_string().contains("reference theme"));
    }
}

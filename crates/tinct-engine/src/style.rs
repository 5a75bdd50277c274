//! The style map: the flat key/value document being resolved.
//!
//! Style keys are dotted strings (`editor.background`) mapping to arbitrary
//! JSON values. During resolution a key can also hold [`StyleValue::Unset`],
//! the "not yet resolved" marker carried over from the template. Unset keys
//! are real entries (they keep the template's key set) but every default
//! filling rule treats them as absent.
//!
//! # First write wins
//!
//! Most layers only fill keys that are not already concrete:
//!
//! ```rust
//! use tinct_engine::{StyleMap, StyleValue};
//!
//! let mut style = StyleMap::new();
//! style.insert("text", StyleValue::Unset);
//!
//! style.set_default("text", "#E0DEF4");
//! style.set_default("text", "#FFFFFF");
//!
//! assert_eq!(style.get_str("text"), Some("#E0DEF4"));
//! ```
//!
//! Unconditional layers use [`StyleMap::insert`] instead.
//!
//! On disk the marker is spelled `"TODO"`; [`StyleMap::from_json`] and
//! [`StyleMap::to_json`] translate between the two.

use std::collections::btree_map::{self, BTreeMap};

use serde_json::{Map, Value};

use crate::error::{DocumentKind, Error, Result};

/// On-disk spelling of [`StyleValue::Unset`].
pub const UNSET_MARKER: &str = "TODO";

/// A value in the style map.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Placeholder that any layer may fill.
    Unset,
    /// A resolved value (string, array, object, or JSON null).
    Value(Value),
}

impl StyleValue {
    /// Converts a document value, mapping the `"TODO"` marker to `Unset`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) if s == UNSET_MARKER => StyleValue::Unset,
            other => StyleValue::Value(other),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, StyleValue::Unset)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            StyleValue::Unset => None,
            StyleValue::Value(v) => Some(v),
        }
    }

    /// The value as a non-empty string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        self.as_value()
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl From<Value> for StyleValue {
    fn from(value: Value) -> Self {
        StyleValue::Value(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Value(Value::String(value.to_string()))
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Value(Value::String(value))
    }
}

/// An ordered map of style keys to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    entries: BTreeMap<String, StyleValue>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a style map from a JSON object, translating `"TODO"` markers.
    pub fn from_json(map: Map<String, Value>) -> Self {
        let entries = map
            .into_iter()
            .map(|(key, value)| (key, StyleValue::from_json(value)))
            .collect();
        Self { entries }
    }

    /// Parses a style template document (a flat JSON object).
    pub fn template_from_json_str(input: &str) -> Result<Self> {
        let map: Map<String, Value> =
            serde_json::from_str(input).map_err(Error::parse(DocumentKind::Template))?;
        Ok(Self::from_json(map))
    }

    /// Converts to a JSON object.
    ///
    /// Unset keys are dropped unless `keep_unset` is set, in which case they
    /// are written as `"TODO"`.
    pub fn to_json(&self, keep_unset: bool) -> Map<String, Value> {
        let mut out = Map::new();
        for (key, value) in &self.entries {
            match value {
                StyleValue::Value(v) => {
                    out.insert(key.clone(), v.clone());
                }
                StyleValue::Unset if keep_unset => {
                    out.insert(key.clone(), Value::String(UNSET_MARKER.to_string()));
                }
                StyleValue::Unset => {}
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    /// The concrete value at `key`, if any.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).and_then(StyleValue::as_value)
    }

    /// The concrete non-empty string at `key`, if any.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(StyleValue::as_str)
    }

    /// Whether `key` is absent or holds the unset marker.
    pub fn is_unset(&self, key: &str) -> bool {
        self.entries.get(key).map_or(true, StyleValue::is_unset)
    }

    /// Whether `key` holds a concrete value.
    pub fn has_value(&self, key: &str) -> bool {
        !self.is_unset(key)
    }

    /// Writes unconditionally.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.entries.remove(key)
    }

    /// Writes `value` only when `key` is unset.
    pub fn set_default(&mut self, key: &str, value: impl Into<StyleValue>) {
        if self.is_unset(key) {
            self.entries.insert(key.to_string(), value.into());
        }
    }

    /// Writes each key with `value` where unset.
    pub fn set_defaults(&mut self, keys: &[&str], value: &str) {
        for key in keys {
            self.set_default(key, value);
        }
    }

    /// Like [`set_default`](Self::set_default), but a missing color is a no-op.
    pub fn set_color(&mut self, key: &str, color: Option<&str>) {
        if let Some(color) = color.filter(|c| !c.is_empty()) {
            self.set_default(key, color);
        }
    }

    /// Overlays every entry of a JSON object, unconditionally.
    pub fn merge_json(&mut self, map: &Map<String, Value>) {
        for (key, value) in map {
            self.entries
                .insert(key.clone(), StyleValue::from_json(value.clone()));
        }
    }

    /// Overlays string entries, unconditionally.
    pub fn merge_strings<'a, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (key, value) in entries {
            self.entries
                .insert(key.clone(), StyleValue::from(value.as_str()));
        }
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|key, _| keep(key));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, StyleValue> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a StyleMap {
    type Item = (&'a String, &'a StyleValue);
    type IntoIter = btree_map::Iter<'a, String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! Key-level comparison of a generated style against a reference.

use serde_json::{Map, Value};

/// The three ways a generated style can disagree with a reference.
///
/// Every list is sorted. Values are compared with deep JSON equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDiff {
    /// Keys the reference has and the generated style lacks.
    pub missing: Vec<String>,
    /// Keys the generated style has and the reference lacks.
    pub extra: Vec<String>,
    /// Keys present in both with different values.
    pub changed: Vec<String>,
}

impl StyleDiff {
    pub fn between(reference: &Map<String, Value>, generated: &Map<String, Value>) -> Self {
        let mut diff = StyleDiff::default();
        for (key, value) in reference {
            match generated.get(key) {
                None => diff.missing.push(key.clone()),
                Some(other) if other != value => diff.changed.push(key.clone()),
                Some(_) => {}
            }
        }
        diff.extra = generated
            .keys()
            .filter(|key| !reference.contains_key(*key))
            .cloned()
            .collect();
        // serde_json::Map iterates in key order unless preserve_order is on
        diff.missing.sort();
        diff.extra.sort();
        diff.changed.sort();
        diff
    }

    /// No missing and no changed keys. Extra keys are tolerated.
    pub fn converged(&self) -> bool {
        self.missing.is_empty() && self.changed.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.converged() && self.extra.is_empty()
    }

    /// Missing keys followed by changed keys: the ones an override can fix.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.missing
            .iter()
            .chain(self.changed.iter())
            .map(String::as_str)
    }
}

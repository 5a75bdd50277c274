//! Pruning a resolved style down to a palette's embedded fragment.
//!
//! A palette that embeds a substantial pre-resolved `style` fragment usually
//! mirrors an existing theme key for key. In that case the generated style is
//! cut back to exactly the fragment's key set so the output does not grow keys
//! the original never had.

use serde_json::{Map, Value};

use crate::style::StyleMap;

/// Fragments larger than this are pruned even without an anchor key.
const PRUNE_KEY_THRESHOLD: usize = 20;

/// Keys whose presence marks a fragment as a full theme body.
const ANCHOR_KEYS: &[&str] = &["background", "editor.background", "text", "terminal.foreground"];

/// Whether a style fragment is complete enough to prune against.
///
/// A fragment holding only `syntax` and/or `players` never qualifies.
pub fn should_prune(fragment: &Map<String, Value>) -> bool {
    let only_tables = fragment
        .keys()
        .all(|key| key == "syntax" || key == "players");
    if fragment.is_empty() || only_tables {
        return false;
    }
    if ANCHOR_KEYS.iter().any(|key| fragment.contains_key(*key)) {
        return true;
    }
    fragment.len() > PRUNE_KEY_THRESHOLD
}

/// Removes every key of `style` not present in `fragment`.
pub fn prune_to(style: &mut StyleMap, fragment: &Map<String, Value>) {
    style.retain(|key| fragment.contains_key(key));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fragment(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_empty_and_table_only_fragments_never_prune() {
        assert!(!should_prune(&Map::new()));
        assert!(!should_prune(&fragment(json!({"syntax": {}}))));
        assert!(!should_prune(&fragment(json!({"players": []}))));
        assert!(!should_prune(&fragment(json!({"players": [], "syntax": {}}))));
    }

    #[test]
    fn test_anchor_keys_prune() {
        for key in ANCHOR_KEYS {
            let mut map = Map::new();
            map.insert(key.to_string(), json!("#000000"));
            assert!(should_prune(&map), "{key}");
        }
    }

    #[test]
    fn test_size_threshold() {
        let mut map = Map::new();
        for i in 0..PRUNE_KEY_THRESHOLD {
            map.insert(format!("k{i}"), json!("#000000"));
        }
        assert!(!should_prune(&map));
        map.insert("one.more".into(), json!("#000000"));
        assert!(should_prune(&map));
    }

    #[test]
    fn test_prune_to_fragment_keys() {
        let mut style = StyleMap::new();
        style.insert("background", "#111111");
        style.insert("text", "#222222");
        style.insert("icon", "#333333");
        prune_to(&mut style, &fragment(json!({"background": "#000000", "text": null})));
        let keys: Vec<&str> = style.keys().collect();
        assert_eq!(keys, vec!["background", "text"]);
    }
}

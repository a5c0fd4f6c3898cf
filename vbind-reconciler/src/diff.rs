//! Keyed map differ
//!
//! Splits the transition between two keyed maps into the keys that must be
//! (re)applied and the keys that must be undone. The differ is pure: it never
//! touches an element and never mutates its inputs.

use crate::types::KeyedMap;
use serde::Serialize;

/// Outcome of diffing a new map against an old one
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiffResult {
    /// Keys that are new or whose value changed, mapped to the new value
    pub changed: KeyedMap,
    /// Keys present only in the old map, mapped to the old value
    pub removed: KeyedMap,
}

impl DiffResult {
    /// True if the two maps were equal
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.removed.is_empty()
    }
}

/// Diff `new` against `old`
///
/// A key present in both maps with a different value appears only in
/// `changed`; value changes are never modelled as remove + add. Key order in
/// each partition follows the order of the map it was taken from.
pub fn diff(new: &KeyedMap, old: &KeyedMap) -> DiffResult {
    let changed = new
        .iter()
        .filter(|(key, value)| old.get(key.as_str()) != Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let removed = old
        .iter()
        .filter(|(key, _)| !new.contains_key(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    DiffResult { changed, removed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn map(value: Value) -> KeyedMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {}", other),
        }
    }

    #[test]
    fn test_diff_partitions() {
        let new = map(json!({"a": 1, "b": 2, "c": 3}));
        let old = map(json!({"b": 2, "c": 4, "d": 5}));

        let result = diff(&new, &old);

        assert_eq!(result.changed, map(json!({"a": 1, "c": 3})));
        assert_eq!(result.removed, map(json!({"d": 5})));
    }

    #[test]
    fn test_diff_equal_maps_is_empty() {
        let value = map(json!({"class": "a", "title": "hi"}));
        assert!(diff(&value, &value).is_empty());
    }

    #[test]
    fn test_diff_against_empty() {
        let value = map(json!({"x": true, "y": false}));
        let empty = KeyedMap::new();

        let first_render = diff(&value, &empty);
        assert_eq!(first_render.changed, value);
        assert!(first_render.removed.is_empty());

        let teardown = diff(&empty, &value);
        assert!(teardown.changed.is_empty());
        assert_eq!(teardown.removed, value);
    }

    #[test]
    fn test_diff_key_sets() {
        let cases = [
            (json!({"a": 1}), json!({"a": 1})),
            (json!({"a": 1, "b": null}), json!({"b": 0, "c": "x"})),
            (json!({}), json!({"a": [1], "b": {"c": 1}})),
            (json!({"a": {"c": 1}}), json!({"a": {"c": 2}})),
        ];

        for (new, old) in cases {
            let (new, old) = (map(new), map(old));
            let result = diff(&new, &old);

            // changed ⊆ keys(new)
            assert!(result.changed.keys().all(|k| new.contains_key(k)));
            // removed = keys(old) - keys(new)
            let expected_removed: Vec<_> = old.keys().filter(|k| !new.contains_key(*k)).collect();
            assert_eq!(result.removed.keys().collect::<Vec<_>>(), expected_removed);
            // disjoint
            assert!(result.changed.keys().all(|k| !result.removed.contains_key(k)));
        }
    }

    #[test]
    fn test_diff_compares_nested_values_structurally() {
        let new = map(json!({"class": {"a": true}}));
        let same = map(json!({"class": {"a": true}}));
        let other = map(json!({"class": {"a": false}}));

        assert!(diff(&new, &same).is_empty());
        assert_eq!(diff(&new, &other).changed.len(), 1);
    }

    #[test]
    fn test_diff_does_not_touch_inputs() {
        let new = map(json!({"a": 1}));
        let old = map(json!({"b": 2}));
        let (new_before, old_before) = (new.clone(), old.clone());

        let _ = diff(&new, &old);

        assert_eq!(new, new_before);
        assert_eq!(old, old_before);
    }
}

//! Dotted-path helpers over JSON trees.

use serde_json::{Map, Value};

/// Walk `root` along the `.`-separated segments of `key`.
///
/// Only objects are traversed. Returns `None` when a segment is absent or an
/// intermediate value is not an object.
pub fn lookup_path<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.')
        .try_fold(root, |node, segment| node.as_object()?.get(segment))
}

/// Deep-merge `source` into `target`.
///
/// Objects are merged key by key, recursively. Any other source value
/// replaces the target value.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => merge_maps(target, source),
        (target, source) => *target = source.clone(),
    }
}

/// Deep-merge two objects, see [`deep_merge`].
pub(crate) fn merge_maps(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match target.get_mut(key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Collect the dotted paths of every string leaf below `root`.
///
/// Non-string leaves are skipped.
pub fn flatten_keys(root: &Value) -> Vec<String> {
    let mut keys = Vec::new();
    collect_keys(root, None, &mut keys);
    keys
}

fn collect_keys(node: &Value, prefix: Option<&str>, keys: &mut Vec<String>) {
    match node {
        Value::Object(map) => {
            for (segment, child) in map {
                let path = join_path(prefix, segment);
                collect_keys(child, Some(&path), keys);
            }
        }
        Value::String(_) => {
            if let Some(path) = prefix {
                keys.push(path.to_string());
            }
        }
        _ => {}
    }
}

/// Join path segments with `.`, dropping empty ones.
pub(crate) fn join_path(prefix: Option<&str>, segment: &str) -> String {
    [prefix.unwrap_or_default(), segment]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_path_nested() {
        let tree = json!({ "foo": { "bar": { "baz": "qux" } } });
        assert_eq!(lookup_path(&tree, "foo.bar.baz"), Some(&json!("qux")));
        assert_eq!(lookup_path(&tree, "foo.bar"), Some(&json!({ "baz": "qux" })));
    }

    #[test]
    fn test_lookup_path_missing_segment() {
        let tree = json!({ "foo": { "bar": "baz" } });
        assert_eq!(lookup_path(&tree, "foo.nope"), None);
        assert_eq!(lookup_path(&tree, "nope.bar"), None);
    }

    #[test]
    fn test_lookup_path_through_non_object() {
        let tree = json!({ "foo": "bar", "list": ["a", "b"] });
        assert_eq!(lookup_path(&tree, "foo.bar"), None);
        assert_eq!(lookup_path(&tree, "list.0"), None);
    }

    #[test]
    fn test_lookup_path_is_not_a_pattern() {
        let tree = json!({ "f.o": "dotted", "fxo": "plain" });
        assert_eq!(lookup_path(&tree, "f*o"), None);
        assert_eq!(lookup_path(&tree, "fxo"), Some(&json!("plain")));
    }

    #[test]
    fn test_deep_merge_keeps_siblings() {
        let mut target = json!({ "en": { "a": "1", "nested": { "b": "2" } } });
        deep_merge(&mut target, &json!({ "en": { "nested": { "c": "3" } }, "de": { "a": "eins" } }));

        assert_eq!(
            target,
            json!({
                "en": { "a": "1", "nested": { "b": "2", "c": "3" } },
                "de": { "a": "eins" }
            })
        );
    }

    #[test]
    fn test_deep_merge_overwrites_leaves() {
        let mut target = json!({ "foo": "bar", "obj": { "x": "y" } });
        deep_merge(&mut target, &json!({ "foo": "baz", "obj": "flat" }));
        assert_eq!(target, json!({ "foo": "baz", "obj": "flat" }));
    }

    #[test]
    fn test_flatten_keys_skips_non_strings() {
        let tree = json!({ "foo": { "bar": "baz", "count": 3 }, "ping": "pong" });
        assert_eq!(flatten_keys(&tree), vec!["foo.bar", "ping"]);
    }

    #[test]
    fn test_join_path_compacts_empty_segments() {
        assert_eq!(join_path(None, "foo"), "foo");
        assert_eq!(join_path(Some(""), "foo"), "foo");
        assert_eq!(join_path(Some("yolo"), "swag"), "yolo.swag");
    }
}

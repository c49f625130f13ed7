//! Whole-tree operations: constant fill, defaults and merge.

use std::sync::Arc;

use formstate_util::{Map, Value};

/// Returns a tree shaped like `root` with every leaf replaced by `constant`.
///
/// Arrays and objects are walked; everything else is a leaf. Empty
/// containers stay empty. Applying it twice with the same constant is a
/// no-op the second time.
///
/// ```
/// use formstate::deep::deep_set;
/// use formstate_util::Value;
/// use serde_json::json;
///
/// let values = Value::from(json!({"name": "Ada", "tags": ["x", "y"]}));
/// let touched = deep_set(&values, &Value::Bool(true));
/// assert_eq!(touched, json!({"name": true, "tags": [true, true]}));
/// ```
pub fn deep_set(root: &Value, constant: &Value) -> Value {
    match root {
        Value::Array(arr) => Value::Array(Arc::new(
            arr.iter().map(|item| deep_set(item, constant)).collect(),
        )),
        Value::Object(map) => Value::Object(Arc::new(
            map.iter()
                .map(|(k, v)| (k.clone(), deep_set(v, constant)))
                .collect(),
        )),
        _ => constant.clone(),
    }
}

/// Like [`deep_set`], but arrays holding no containers are leaves: a
/// multi-value field such as `tags: ["a", "b"]` or an empty `langs: []`
/// becomes a single `constant`.
///
/// This is the fill used for touched flags, where a field holding a list of
/// scalars is touched as a whole.
///
/// ```
/// use formstate::deep::fill_fields;
/// use formstate_util::Value;
/// use serde_json::json;
///
/// let values = Value::from(json!({"tags": ["x"], "langs": [], "rows": [{"a": 1}]}));
/// let touched = fill_fields(&values, &Value::Bool(true));
/// assert_eq!(touched, json!({"tags": true, "langs": true, "rows": [{"a": true}]}));
/// ```
pub fn fill_fields(root: &Value, constant: &Value) -> Value {
    match root {
        Value::Array(arr) if arr.iter().any(Value::is_container) => Value::Array(Arc::new(
            arr.iter().map(|item| fill_fields(item, constant)).collect(),
        )),
        Value::Object(map) => Value::Object(Arc::new(
            map.iter()
                .map(|(k, v)| (k.clone(), fill_fields(v, constant)))
                .collect(),
        )),
        _ => constant.clone(),
    }
}

/// Deep-merges `defaults` into `target`, filling only what `target` lacks.
///
/// Objects merge by key and arrays by index. A `Null` in `target` counts as
/// absent (array padding holes are `Null`). On any other conflict `target`
/// wins.
pub fn defaults_deep(target: &Value, defaults: &Value) -> Value {
    match (target, defaults) {
        (Value::Null, _) => defaults.clone(),
        (Value::Object(t), Value::Object(d)) => {
            let mut next = Map::clone(t);
            for (key, dv) in d.iter() {
                match next.get_mut(key.as_str()) {
                    Some(tv) => {
                        let merged = defaults_deep(tv, dv);
                        *tv = merged;
                    }
                    None => {
                        next.insert(key.clone(), dv.clone());
                    }
                }
            }
            Value::Object(Arc::new(next))
        }
        (Value::Array(t), Value::Array(d)) => {
            let len = t.len().max(d.len());
            let next = (0..len)
                .map(|i| match (t.get(i), d.get(i)) {
                    (Some(tv), Some(dv)) => defaults_deep(tv, dv),
                    (Some(tv), None) => tv.clone(),
                    (None, Some(dv)) => dv.clone(),
                    (None, None) => Value::Null,
                })
                .collect();
            Value::Array(Arc::new(next))
        }
        _ => target.clone(),
    }
}

/// True for arrays whose items are all strings: an ordered list of error
/// messages. The empty array counts.
pub fn is_message_list(value: &Value) -> bool {
    match value {
        Value::Array(arr) => arr.iter().all(|item| matches!(item, Value::String(_))),
        _ => false,
    }
}

/// Deep merge where `b`'s leaves win.
///
/// Used to combine error trees: entries of `a` that `b` does not address
/// survive, entries both address take `b`'s value. Message lists are leaves,
/// so a later list replaces an earlier one instead of mixing with it; other
/// arrays merge by index.
///
/// ```
/// use formstate::deep::merge;
/// use formstate_util::Value;
/// use serde_json::json;
///
/// let a = Value::from(json!({"email": "required"}));
/// let b = Value::from(json!({"email": "invalid", "password": "required"}));
/// assert_eq!(merge(&a, &b), json!({"email": "invalid", "password": "required"}));
/// ```
pub fn merge(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => {
            let mut next = Map::clone(x);
            for (key, bv) in y.iter() {
                let merged = match next.get(key.as_str()) {
                    Some(av) => merge(av, bv),
                    None => bv.clone(),
                };
                next.insert(key.clone(), merged);
            }
            Value::Object(Arc::new(next))
        }
        (Value::Array(x), Value::Array(y)) if !is_message_list(a) && !is_message_list(b) => {
            let len = x.len().max(y.len());
            let next = (0..len)
                .map(|i| match (x.get(i), y.get(i)) {
                    (Some(av), Some(bv)) => merge(av, bv),
                    (Some(av), None) => av.clone(),
                    (None, Some(bv)) => bv.clone(),
                    (None, None) => Value::Null,
                })
                .collect();
            Value::Array(Arc::new(next))
        }
        _ => b.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(raw: serde_json::Value) -> Value {
        Value::from(raw)
    }

    #[test]
    fn test_deep_set_nested() {
        let root = v(json!({"a": 1, "b": {"c": "x", "d": [1, {"e": null}]}, "f": [], "g": {}}));
        assert_eq!(
            deep_set(&root, &Value::Bool(false)),
            json!({"a": false, "b": {"c": false, "d": [false, {"e": false}]}, "f": [], "g": {}})
        );
    }

    #[test]
    fn test_deep_set_scalar_root() {
        assert_eq!(deep_set(&Value::from(3), &Value::Bool(true)), Value::Bool(true));
    }

    #[test]
    fn test_deep_set_binary_is_leaf() {
        let root = Value::object([("file", Value::binary(vec![1u8, 2]))]);
        assert_eq!(deep_set(&root, &Value::Bool(true)), json!({"file": true}));
    }

    #[test]
    fn test_fill_fields_treats_scalar_lists_as_leaves() {
        let root = v(json!({
            "tags": ["a", "b"],
            "langs": [],
            "rows": [{"city": "Oslo"}, null],
            "name": ""
        }));
        let filled = fill_fields(&root, &Value::Bool(true));
        assert_eq!(
            filled,
            json!({"tags": true, "langs": true, "rows": [{"city": true}, true], "name": true})
        );
        assert_eq!(fill_fields(&filled, &Value::Bool(true)), filled);
    }

    #[test]
    fn test_defaults_deep_fills_absent() {
        let target = v(json!({"name": true}));
        let defaults = v(json!({"name": "Ada", "email": "a@b.c", "tags": ["x"]}));
        assert_eq!(
            defaults_deep(&target, &defaults),
            json!({"name": true, "email": "a@b.c", "tags": ["x"]})
        );
    }

    #[test]
    fn test_defaults_deep_target_wins() {
        let target = v(json!({"a": {"b": 1}, "tags": true}));
        let defaults = v(json!({"a": {"b": 2, "c": 3}, "tags": ["x", "y"]}));
        assert_eq!(
            defaults_deep(&target, &defaults),
            json!({"a": {"b": 1, "c": 3}, "tags": true})
        );
    }

    #[test]
    fn test_defaults_deep_fills_array_holes() {
        let target = v(json!({"rows": [null, {"city": true}]}));
        let defaults = v(json!({"rows": [{"city": "A"}, {"city": "B", "zip": "1"}, {"city": "C"}]}));
        assert_eq!(
            defaults_deep(&target, &defaults),
            json!({"rows": [{"city": "A"}, {"city": true, "zip": "1"}, {"city": "C"}]})
        );
    }

    #[test]
    fn test_merge_later_wins() {
        let a = v(json!({"email": "required", "name": "too short"}));
        let b = v(json!({"email": "invalid"}));
        assert_eq!(merge(&a, &b), json!({"email": "invalid", "name": "too short"}));
    }

    #[test]
    fn test_merge_message_lists_replace() {
        let a = v(json!({"password": ["too short", "needs a digit"]}));
        let b = v(json!({"password": ["reused"]}));
        assert_eq!(merge(&a, &b), json!({"password": ["reused"]}));
    }

    #[test]
    fn test_merge_nested_arrays_by_index() {
        let a = v(json!({"rows": [{"city": "required"}, null]}));
        let b = v(json!({"rows": [{"zip": "invalid"}, {"city": "unknown"}]}));
        assert_eq!(
            merge(&a, &b),
            json!({"rows": [{"city": "required", "zip": "invalid"}, {"city": "unknown"}]})
        );
    }

    #[test]
    fn test_merge_null_in_b_overrides() {
        let a = v(json!({"email": "required"}));
        let b = v(json!({"email": null}));
        assert_eq!(merge(&a, &b), json!({"email": null}));
    }
}

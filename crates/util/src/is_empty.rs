use crate::value::Value;

/// Check if a value has no own properties.
///
/// Returns true for empty objects and empty arrays, and for scalars (they
/// have no properties).
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        _ => true,
    }
}

/// Check if a tree carries no leaf data at all.
///
/// `Null` counts as absent, so `{"a": null, "b": {"c": []}}` is empty while
/// `{"a": ""}` is not. Used to decide whether an error tree means "valid".
pub fn is_empty_tree(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.values().all(is_empty_tree),
        Value::Array(arr) => arr.iter().all(is_empty_tree),
        _ => false,
    }
}

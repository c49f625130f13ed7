use std::sync::Arc;

use crate::value::{Map, Value};

/// Creates a fully independent copy of a value tree.
///
/// Every array and object is re-allocated. Binary payloads keep their
/// identity: they are carried by reference, not copied byte by byte.
///
/// # Examples
///
/// ```
/// use formstate_util::{deep_clone, Value};
/// use serde_json::json;
///
/// let original = Value::from(json!({"foo": [1, 2, 3]}));
/// let cloned = deep_clone(&original);
///
/// assert_eq!(original, cloned);
/// assert!(!original.ptr_eq(&cloned));
/// ```
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Binary(bytes) => Value::Binary(Arc::clone(bytes)),
        Value::Array(arr) => Value::Array(Arc::new(arr.iter().map(deep_clone).collect())),
        Value::Object(obj) => {
            let mut new_obj = Map::with_capacity(obj.len());
            for (key, val) in obj.iter() {
                new_obj.insert(key.clone(), deep_clone(val));
            }
            Value::Object(Arc::new(new_obj))
        }
    }
}

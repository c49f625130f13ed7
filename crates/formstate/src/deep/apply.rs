//! Path-addressed copy-on-write operations.

use std::sync::Arc;

use formstate_path::{resolve, PathStep};
use formstate_util::{Map, Value};

use super::types::DeepError;

// ── Navigation ────────────────────────────────────────────────────────────

/// Read-only lookup; `None` for missing paths.
pub fn get<'a>(root: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    resolve(path, root)
}

fn array_at(root: &Value, path: &[PathStep]) -> Result<Vec<Value>, DeepError> {
    match get(root, path) {
        Some(Value::Array(arr)) => Ok(arr.to_vec()),
        Some(other) => Err(DeepError::NotAnArray {
            found: other.kind(),
        }),
        None => Err(DeepError::NotAnArray { found: "nothing" }),
    }
}

fn check_index(index: usize, len: usize) -> Result<(), DeepError> {
    if index >= len {
        return Err(DeepError::IndexOutOfRange { index, len });
    }
    Ok(())
}

// ── set ───────────────────────────────────────────────────────────────────

/// How far past the end of an array `set` may write. The gap is filled with
/// `Null`.
pub const MAX_ARRAY_PADDING: usize = 1024;

/// Returns a new root with `value` stored at `path`.
///
/// Containers along the path are re-allocated; siblings are shared with
/// `root`. Missing (or scalar) intermediates are created as an array when
/// the step addressing into them is an index, else as an object. Writing
/// past the end of an array pads it with `Null`.
///
/// # Errors
///
/// `DeepError::KeyOnArray` if a non-index step addresses an existing array,
/// `DeepError::IndexOutOfRange` if an index lies more than
/// [`MAX_ARRAY_PADDING`] past the end of its array.
/// Nothing is returned in that case, so callers never see a half-applied
/// update.
pub fn set(root: &Value, path: &[PathStep], value: Value) -> Result<Value, DeepError> {
    set_in(Some(root), path, value)
}

fn set_in(node: Option<&Value>, path: &[PathStep], value: Value) -> Result<Value, DeepError> {
    let Some((step, rest)) = path.split_first() else {
        return Ok(value);
    };
    match node {
        Some(Value::Array(arr)) => {
            let index = step
                .as_index()
                .ok_or_else(|| DeepError::KeyOnArray { key: step.to_key() })?;
            if index > arr.len().saturating_add(MAX_ARRAY_PADDING) {
                return Err(DeepError::IndexOutOfRange {
                    index,
                    len: arr.len(),
                });
            }
            let child = set_in(arr.get(index), rest, value)?;
            let mut next = Vec::with_capacity(arr.len().max(index + 1));
            next.extend(arr.iter().cloned());
            if index >= next.len() {
                next.resize(index + 1, Value::Null);
            }
            next[index] = child;
            Ok(Value::Array(Arc::new(next)))
        }
        Some(Value::Object(map)) => {
            let key = step.to_key();
            let child = set_in(map.get(key.as_str()), rest, value)?;
            let mut next = Map::clone(map);
            next.insert(key, child);
            Ok(Value::Object(Arc::new(next)))
        }
        _ => {
            let fresh = if step.as_index().is_some() {
                Value::empty_array()
            } else {
                Value::empty_object()
            };
            set_in(Some(&fresh), path, value)
        }
    }
}

// ── unset ─────────────────────────────────────────────────────────────────

/// Returns a new root with the value at `path` removed.
///
/// Removing an array element shifts the later elements down; an array that
/// becomes empty stays in place as `[]`. A missing path returns `root`
/// unchanged (sharing all of it). Unsetting the root path yields `Null`.
pub fn unset(root: &Value, path: &[PathStep]) -> Value {
    if path.is_empty() {
        return Value::Null;
    }
    unset_in(root, path).unwrap_or_else(|| root.clone())
}

/// `None` means "nothing to remove".
fn unset_in(node: &Value, path: &[PathStep]) -> Option<Value> {
    let (step, rest) = path.split_first()?;
    match node {
        Value::Array(arr) => {
            let index = step.as_index()?;
            let child = arr.get(index)?;
            if rest.is_empty() {
                let mut next = arr.to_vec();
                next.remove(index);
                return Some(Value::Array(Arc::new(next)));
            }
            let updated = unset_in(child, rest)?;
            let mut next = arr.to_vec();
            next[index] = updated;
            Some(Value::Array(Arc::new(next)))
        }
        Value::Object(map) => {
            let key = step.to_key();
            let child = map.get(key.as_str())?;
            if rest.is_empty() {
                let mut next = Map::clone(map);
                next.shift_remove(key.as_str());
                return Some(Value::Object(Arc::new(next)));
            }
            let updated = unset_in(child, rest)?;
            let mut next = Map::clone(map);
            next.insert(key, updated);
            Some(Value::Object(Arc::new(next)))
        }
        _ => None,
    }
}

// ── Array edits ───────────────────────────────────────────────────────────

/// Inserts `value` into the array at `path`.
///
/// `index` of `None` (or past the end) appends. A missing or `Null` target
/// becomes a one-element array.
///
/// # Errors
///
/// `DeepError::NotAnArray` if the target exists and is not an array.
pub fn insert(
    root: &Value,
    path: &[PathStep],
    index: Option<usize>,
    value: Value,
) -> Result<Value, DeepError> {
    let mut items = match get(root, path) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(arr)) => arr.to_vec(),
        Some(other) => {
            return Err(DeepError::NotAnArray {
                found: other.kind(),
            })
        }
    };
    let at = index.map_or(items.len(), |i| i.min(items.len()));
    items.insert(at, value);
    set(root, path, Value::from(items))
}

/// Swaps two elements of the array at `path`.
pub fn swap(root: &Value, path: &[PathStep], a: usize, b: usize) -> Result<Value, DeepError> {
    let mut items = array_at(root, path)?;
    check_index(a, items.len())?;
    check_index(b, items.len())?;
    items.swap(a, b);
    set(root, path, Value::from(items))
}

/// Moves the element at `from` so that it ends up at `to`, shifting the
/// elements in between. `to` past the end moves the element last.
pub fn move_item(
    root: &Value,
    path: &[PathStep],
    from: usize,
    to: usize,
) -> Result<Value, DeepError> {
    let mut items = array_at(root, path)?;
    check_index(from, items.len())?;
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    set(root, path, Value::from(items))
}

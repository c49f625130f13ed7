use formstate_util::Value;

use crate::types::PathStep;

/// Resolve a value in a tree by path.
///
/// Returns `None` if any step is missing or lands on the wrong kind of
/// container. Absence is an expected state, not an error.
pub fn resolve<'a>(steps: &[PathStep], root: &'a Value) -> Option<&'a Value> {
    let mut current = root;
    for step in steps {
        current = match current {
            Value::Array(arr) => arr.get(step.as_index()?)?,
            Value::Object(map) => match step {
                PathStep::Key(k) => map.get(k.as_str())?,
                PathStep::Index(i) => map.get(i.to_string().as_str())?,
            },
            _ => return None,
        };
    }
    Some(current)
}

/// Get a value from a tree by path, root first.
///
/// Argument order matches the structural helpers (`get(root, path)`).
pub fn get<'a>(root: &'a Value, steps: &[PathStep]) -> Option<&'a Value> {
    resolve(steps, root)
}

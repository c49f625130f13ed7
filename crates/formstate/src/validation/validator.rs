//! Validator function type and registry.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use formstate_util::Value;

use crate::error::BoxError;

/// Error tree: field paths mirrored as nested objects/arrays whose leaves
/// are a message string or a list of message strings.
pub type ErrorTree = Value;

/// What a validator produces. `Ok(None)` means "no errors"; `Err` means the
/// validator itself broke.
pub type ValidationResult = Result<Option<ErrorTree>, BoxError>;

type ValidateFn = dyn Fn(Value) -> BoxFuture<'static, ValidationResult> + Send + Sync;

/// A validation function of any origin (hand written rules, schema
/// adapters, remote checks) behind one suspend-capable signature.
///
/// Cloning is cheap; clones call the same function.
#[derive(Clone)]
pub struct Validator {
    func: Arc<ValidateFn>,
}

impl Validator {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Value) -> BoxFuture<'static, ValidationResult> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Wraps a synchronous validation function.
    ///
    /// ```
    /// use formstate::validation::Validator;
    /// use formstate_util::Value;
    /// use serde_json::json;
    ///
    /// let required_email = Validator::sync(|data: &Value| {
    ///     let email = data.as_object().and_then(|m| m.get("email")).and_then(Value::as_str);
    ///     Ok(match email {
    ///         Some(e) if !e.is_empty() => None,
    ///         _ => Some(Value::from(json!({"email": "required"}))),
    ///     })
    /// });
    /// # let _ = required_email;
    /// ```
    pub fn sync<F>(func: F) -> Self
    where
        F: Fn(&Value) -> ValidationResult + Send + Sync + 'static,
    {
        Self::new(move |data| future::ready(func(&data)).boxed())
    }

    /// Wraps an asynchronous validation function.
    pub fn from_async<F, Fut>(func: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ValidationResult> + Send + 'static,
    {
        Self::new(move |data| func(data).boxed())
    }

    /// Starts a run against `data`.
    pub fn call(&self, data: Value) -> BoxFuture<'static, ValidationResult> {
        (self.func)(data)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

/// Handle returned by registration, used to remove a validator again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidatorId(u64);

/// Ordered validator list. Order decides merge precedence: later entries
/// override earlier ones on shared paths.
#[derive(Debug, Default)]
pub struct ValidatorRegistry {
    next_id: u64,
    entries: Vec<(ValidatorId, Validator)>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, validator: Validator) -> ValidatorId {
        let id = ValidatorId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, validator));
        id
    }

    pub fn remove(&mut self, id: ValidatorId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Registry contents in order, detached from the registry so that later
    /// registration changes do not affect a run already started.
    pub fn snapshot(&self) -> Vec<Validator> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single error entry: one message or several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    pub fn into_value(self) -> Value {
        match self {
            ErrorMessage::One(msg) => Value::String(msg),
            ErrorMessage::Many(msgs) => Value::array(msgs.into_iter().map(Value::String)),
        }
    }
}

impl From<&str> for ErrorMessage {
    fn from(msg: &str) -> Self {
        ErrorMessage::One(msg.to_string())
    }
}

impl From<String> for ErrorMessage {
    fn from(msg: String) -> Self {
        ErrorMessage::One(msg)
    }
}

impl From<Vec<String>> for ErrorMessage {
    fn from(msgs: Vec<String>) -> Self {
        ErrorMessage::Many(msgs)
    }
}

impl From<Vec<&str>> for ErrorMessage {
    fn from(msgs: Vec<&str>) -> Self {
        ErrorMessage::Many(msgs.into_iter().map(str::to_string).collect())
    }
}

impl From<ErrorMessage> for Value {
    fn from(msg: ErrorMessage) -> Self {
        msg.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_sync_validator_runs() {
        let v = Validator::sync(|_| Ok(Some(Value::from(json!({"a": "bad"})))));
        let out = block_on(v.call(Value::Null)).unwrap();
        assert_eq!(out, Some(Value::from(json!({"a": "bad"}))));
    }

    #[test]
    fn test_async_validator_receives_data() {
        let v = Validator::from_async(|data: Value| async move { Ok::<_, BoxError>(Some(data)) });
        let out = block_on(v.call(Value::from(1))).unwrap();
        assert_eq!(out, Some(Value::from(1)));
    }

    #[test]
    fn test_registry_add_remove_keeps_order() {
        let mut registry = ValidatorRegistry::new();
        let a = registry.add(Validator::sync(|_| Ok(Some(Value::from("a")))));
        let b = registry.add(Validator::sync(|_| Ok(Some(Value::from("b")))));
        let c = registry.add(Validator::sync(|_| Ok(Some(Value::from("c")))));
        assert_ne!(a, b);
        assert!(registry.remove(b));
        assert!(!registry.remove(b));
        assert_eq!(registry.len(), 2);

        let outputs: Vec<_> = registry
            .snapshot()
            .iter()
            .map(|v| block_on(v.call(Value::Null)).unwrap())
            .collect();
        assert_eq!(outputs, vec![Some(Value::from("a")), Some(Value::from("c"))]);
        let _ = c;
    }

    #[test]
    fn test_error_message_values() {
        assert_eq!(ErrorMessage::from("required").into_value(), Value::from("required"));
        assert_eq!(
            Value::from(ErrorMessage::from(vec!["a", "b"])),
            json!(["a", "b"])
        );
    }
}

use std::sync::{Arc, Mutex};

use formstate_util::{deep_clone, Value};

use super::FormState;
use crate::bridge::ControlBridge;
use crate::options::{FormOptions, ResetErrors};
use crate::store::Store;
use crate::validation::{Validator, ValidatorRegistry};

/// Step-by-step construction of a [`FormState`].
///
/// ```
/// use formstate::{FormState, ResetErrors, Validator};
/// use serde_json::json;
///
/// let form = FormState::builder()
///     .initial_values(json!({"name": ""}))
///     .validator(Validator::sync(|_| Ok(None)))
///     .reset_errors(ResetErrors::Clear)
///     .build();
/// assert_eq!(form.values(), json!({"name": ""}));
/// ```
pub struct FormBuilder {
    initial_values: Value,
    validators: Vec<Validator>,
    bridge: Option<Arc<dyn ControlBridge>>,
    options: FormOptions,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self {
            initial_values: Value::empty_object(),
            validators: Vec::new(),
            bridge: None,
            options: FormOptions::default(),
        }
    }

    pub fn initial_values(mut self, values: impl Into<Value>) -> Self {
        self.initial_values = values.into();
        self
    }

    /// Appends a validator. Validators registered later win on conflicting
    /// paths.
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn bridge(mut self, bridge: Arc<dyn ControlBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    pub fn options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    pub fn reset_errors(mut self, policy: ResetErrors) -> Self {
        self.options.reset_errors = policy;
        self
    }

    pub fn touch_on_validate(mut self, touch: bool) -> Self {
        self.options.touch_on_validate = touch;
        self
    }

    /// Builds the form. The values start as a deep clone of the initial
    /// values and an attached bridge is synced right away.
    pub fn build(self) -> FormState {
        let mut registry = ValidatorRegistry::new();
        for validator in self.validators {
            registry.add(validator);
        }
        let form = FormState {
            values: Store::new(deep_clone(&self.initial_values)),
            touched: Store::new(Value::empty_object()),
            errors: Store::new(Value::empty_object()),
            initial_values: Mutex::new(self.initial_values),
            validators: Mutex::new(registry),
            bridge: Mutex::new(None),
            options: self.options,
        };
        if let Some(bridge) = self.bridge {
            form.set_bridge(Some(bridge));
        }
        form
    }
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

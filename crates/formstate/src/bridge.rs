//! Contract between the engine and live form controls.
//!
//! The engine never touches a DOM. It asks a [`ControlBridge`] which
//! controls exist, derives each control's path from its name, and hands
//! back a [`ControlWrite`] shaped for the control's kind.

use formstate_path::{parse_path, Path, PathError};
use formstate_util::Value;

/// Opaque control handle, assigned by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub usize);

/// The semantics a control has when a value is pushed into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Text,
    TextArea,
    Number,
    Hidden,
    Checkbox,
    Radio,
    Select,
    SelectMultiple,
    File,
}

/// A form control as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub id: ControlId,
    /// The control's `name`. A trailing `[]` marks one member of an
    /// array-valued field.
    pub name: String,
    pub kind: ControlKind,
    /// The `value` attribute of checkboxes and radios.
    pub option_value: Option<String>,
    /// Explicit position inside an array-valued field.
    pub index: Option<usize>,
}

impl Control {
    pub fn new(id: usize, name: impl Into<String>, kind: ControlKind) -> Self {
        Self {
            id: ControlId(id),
            name: name.into(),
            kind,
            option_value: None,
            index: None,
        }
    }

    pub fn with_option(mut self, option_value: impl Into<String>) -> Self {
        self.option_value = Some(option_value.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Checkboxes and radios sharing a name behave as one field.
    pub fn is_grouped(&self) -> bool {
        match self.kind {
            ControlKind::Radio => true,
            ControlKind::Checkbox => self.option_value.is_some() && self.index.is_none(),
            _ => false,
        }
    }
}

/// A value pushed into a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlWrite {
    Text(String),
    Checked(bool),
    Selected(Vec<String>),
}

/// Live control collection.
pub trait ControlBridge: Send + Sync {
    /// Controls that represent form fields, in document order.
    fn controls(&self) -> Vec<Control>;

    /// Pushes a value into one control.
    fn write(&self, id: ControlId, write: ControlWrite);
}

/// Derives the field path a control is bound to.
///
/// `name[]` with an explicit index and `name` with an index both address
/// `name[index]`.
pub fn control_path(control: &Control) -> Result<Path, PathError> {
    let name = control.name.strip_suffix("[]").unwrap_or(&control.name);
    let path = parse_path(name)?;
    Ok(match control.index {
        Some(index) => path.with_index(index),
        None => path,
    })
}

/// String form of a scalar for text-like controls. `None` for values a
/// text control cannot show.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        Value::Binary(_) => None,
    }
}

/// Converts `value` into the write that fits `control`.
///
/// Returns `None` when the control cannot receive the value (file inputs,
/// binary values in text controls).
pub fn control_write(control: &Control, value: &Value) -> Option<ControlWrite> {
    match control.kind {
        ControlKind::File => None,
        ControlKind::Checkbox => {
            let option = control.option_value.as_deref();
            let checked = match (value, option) {
                (Value::Bool(b), _) => *b,
                (Value::Null, _) => false,
                (Value::Array(items), Some(option)) => items
                    .iter()
                    .any(|item| value_text(item).as_deref() == Some(option)),
                (Value::Array(_), None) => false,
                (other, Some(option)) => value_text(other).as_deref() == Some(option),
                (Value::String(s), None) => !s.is_empty(),
                (_, None) => true,
            };
            Some(ControlWrite::Checked(checked))
        }
        ControlKind::Radio => {
            let option = control.option_value.as_deref();
            let checked = option.is_some() && value_text(value).as_deref() == option;
            Some(ControlWrite::Checked(checked))
        }
        ControlKind::SelectMultiple => {
            let selected = match value {
                Value::Null => Vec::new(),
                Value::Array(items) => items.iter().filter_map(value_text).collect(),
                other => value_text(other).into_iter().collect(),
            };
            Some(ControlWrite::Selected(selected))
        }
        ControlKind::Text
        | ControlKind::TextArea
        | ControlKind::Number
        | ControlKind::Hidden
        | ControlKind::Select => value_text(value).map(ControlWrite::Text),
    }
}

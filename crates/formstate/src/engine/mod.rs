//! The form state engine.
//!
//! [`FormState`] owns three stores that move together: the current values,
//! the touched flags and the validation errors. Every mutation parses its
//! path and computes the next tree before any store is written, so a failed
//! call leaves all three untouched.

mod builder;

pub use builder::FormBuilder;

use std::fmt;
use std::sync::{Arc, Mutex};

use formstate_path::{IntoPath, Path, PathError, PathStep};
use formstate_util::{deep_equal, is_empty_tree, Value};
use tracing::{debug, trace};

use crate::bridge::{control_path, control_write, Control, ControlBridge};
use crate::deep::{
    deep_clone, defaults_deep, fill_fields, get, insert, move_item, set, swap, unset,
};
use crate::error::FormError;
use crate::options::{FormOptions, ResetErrors};
use crate::store::{lock, Store, SubscriptionId};
use crate::validation::{execute, ErrorMessage, ErrorTree, Validator, ValidatorId, ValidatorRegistry};

/// Reactive state of one form.
///
/// All methods take `&self`; a field may be edited while a
/// [`validate`](Self::validate) future is still pending. Such a run reports
/// on the values it started with.
pub struct FormState {
    values: Store<Value>,
    touched: Store<Value>,
    errors: Store<Value>,
    initial_values: Mutex<Value>,
    validators: Mutex<ValidatorRegistry>,
    bridge: Mutex<Option<Arc<dyn ControlBridge>>>,
    options: FormOptions,
}

impl FormState {
    /// Creates a form with default options, no validators and no bridge.
    pub fn new(initial_values: impl Into<Value>) -> Self {
        FormBuilder::new().initial_values(initial_values).build()
    }

    pub fn builder() -> FormBuilder {
        FormBuilder::new()
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    // ── Touched ─────────────────────────────────────────────────────────

    /// Marks the field at `path` as touched. Does not validate.
    pub fn set_touched(&self, path: impl IntoPath) -> Result<(), FormError> {
        let path = path.into_path()?;
        trace!(%path, "set_touched");
        self.touched
            .try_update(|touched| set(touched, path.steps(), Value::Bool(true)))?;
        Ok(())
    }

    /// Marks `path[index]` as touched.
    pub fn set_touched_at(&self, path: impl IntoPath, index: usize) -> Result<(), FormError> {
        self.set_touched(path.into_path()?.with_index(index))
    }

    /// Marks every field as touched, including fields present only in the
    /// value tree. Lists of scalars are touched as one field.
    pub fn touch_all(&self) {
        self.fill_touched(true);
    }

    /// Clears every touched flag.
    pub fn untouch_all(&self) {
        self.fill_touched(false);
    }

    fn fill_touched(&self, flag: bool) {
        let values = self.values.get();
        let constant = Value::Bool(flag);
        self.touched
            .update(|touched| fill_fields(&defaults_deep(&values, touched), &constant));
    }

    // ── Errors ──────────────────────────────────────────────────────────

    /// Overwrites the error entry at `path`.
    pub fn set_error(
        &self,
        path: impl IntoPath,
        message: impl Into<ErrorMessage>,
    ) -> Result<(), FormError> {
        let path = path.into_path()?;
        let message = message.into().into_value();
        trace!(%path, "set_error");
        self.errors
            .try_update(|errors| set(errors, path.steps(), message))?;
        Ok(())
    }

    pub fn clear_errors(&self) {
        self.errors.set(Value::empty_object());
    }

    // ── Values ──────────────────────────────────────────────────────────

    /// Sets the value at `path`, optionally marking it touched, and pushes it
    /// to the bound control.
    pub fn set_field(
        &self,
        path: impl IntoPath,
        value: impl Into<Value>,
        touch: bool,
    ) -> Result<(), FormError> {
        let path = path.into_path()?;
        let value = value.into();
        let next_touched = if touch {
            Some(set(&self.touched.get(), path.steps(), Value::Bool(true))?)
        } else {
            None
        };
        trace!(%path, touch, "set_field");
        self.values
            .try_update(|values| set(values, path.steps(), value.clone()))?;
        if let Some(next_touched) = next_touched {
            self.touched.set(next_touched);
        }
        self.sync_control(&path, &value);
        Ok(())
    }

    /// Replaces the whole value tree with a deep clone of `values` and
    /// re-syncs every control.
    pub fn set_fields(&self, values: impl Into<Value>) {
        let values = deep_clone(&values.into());
        debug!("set_fields");
        self.values.set(values);
        self.sync_all_controls();
    }

    /// Removes the field at `path` from the value, touched and error trees.
    /// Array items after it shift down.
    pub fn unset_field(&self, path: impl IntoPath) -> Result<(), FormError> {
        let path = path.into_path()?;
        trace!(%path, "unset_field");
        for store in [&self.values, &self.touched, &self.errors] {
            update_if_changed(store, |tree| unset(tree, path.steps()));
        }
        // Removing an array item shifts its siblings.
        match path.last() {
            Some(step) if step.is_index() => {
                self.sync_controls_under(&path.parent().unwrap_or_default())
            }
            _ => self.sync_controls_under(&path),
        }
        Ok(())
    }

    /// Inserts `value` into the array at `path`. `None` or an index past the
    /// end appends.
    pub fn add_field(
        &self,
        path: impl IntoPath,
        value: impl Into<Value>,
        index: Option<usize>,
    ) -> Result<(), FormError> {
        let path = path.into_path()?;
        let value = value.into();
        let mut at = 0;
        self.values.try_update(|values| {
            at = match get(values, path.steps()) {
                Some(Value::Array(items)) => index.map_or(items.len(), |i| i.min(items.len())),
                _ => 0,
            };
            insert(values, path.steps(), index, value)
        })?;
        trace!(%path, at, "add_field");
        self.realign(path.steps(), 0, |items| {
            if at < items.len() {
                items.insert(at, Value::Null);
            }
        });
        self.sync_controls_under(&path);
        Ok(())
    }

    /// Swaps two items of the array at `path`, carrying their touched flags
    /// and errors along.
    pub fn swap_fields(&self, path: impl IntoPath, a: usize, b: usize) -> Result<(), FormError> {
        let path = path.into_path()?;
        self.values
            .try_update(|values| swap(values, path.steps(), a, b))?;
        trace!(%path, a, b, "swap_fields");
        self.realign(path.steps(), a.max(b) + 1, |items| items.swap(a, b));
        self.sync_controls_under(&path);
        Ok(())
    }

    /// Moves an item of the array at `path` from `from` to `to`.
    pub fn move_field(&self, path: impl IntoPath, from: usize, to: usize) -> Result<(), FormError> {
        let path = path.into_path()?;
        let mut target = to;
        self.values.try_update(|values| {
            if let Some(Value::Array(items)) = get(values, path.steps()) {
                target = to.min(items.len().saturating_sub(1));
            }
            move_item(values, path.steps(), from, to)
        })?;
        trace!(%path, from, to = target, "move_field");
        self.realign(path.steps(), from.max(target) + 1, |items| {
            let item = items.remove(from);
            items.insert(target, item);
        });
        self.sync_controls_under(&path);
        Ok(())
    }

    /// Restores one field from the initial values and marks it untouched.
    pub fn reset_field(&self, path: impl IntoPath) -> Result<(), FormError> {
        let path = path.into_path()?;
        let initial = get(&lock(&self.initial_values), path.steps()).map(deep_clone);
        let next_touched = set(&self.touched.get(), path.steps(), Value::Bool(false))?;
        trace!(%path, "reset_field");
        match initial {
            Some(value) => self
                .values
                .try_update(|values| set(values, path.steps(), value))?,
            None => update_if_changed(&self.values, |values| unset(values, path.steps())),
        }
        self.touched.set(next_touched);
        if self.options.reset_errors == ResetErrors::Clear {
            update_if_changed(&self.errors, |errors| unset(errors, path.steps()));
        }
        self.sync_controls_under(&path);
        Ok(())
    }

    /// Restores the initial values, clears every touched flag and, depending
    /// on [`FormOptions::reset_errors`], the errors.
    pub fn reset(&self) {
        let values = deep_clone(&lock(&self.initial_values));
        debug!(reset_errors = ?self.options.reset_errors, "reset");
        self.values.set(values);
        self.sync_all_controls();
        self.untouch_all();
        if self.options.reset_errors == ResetErrors::Clear {
            self.clear_errors();
        }
    }

    // ── Validation ──────────────────────────────────────────────────────

    pub fn add_validator(&self, validator: Validator) -> ValidatorId {
        lock(&self.validators).add(validator)
    }

    pub fn remove_validator(&self, id: ValidatorId) -> bool {
        lock(&self.validators).remove(id)
    }

    /// Touches every field (unless disabled in the options), then runs the
    /// validators and publishes their merged result as the new error tree.
    pub async fn validate(&self) -> Result<Option<ErrorTree>, FormError> {
        if self.options.touch_on_validate {
            self.touch_all();
        }
        self.run_validators().await
    }

    /// Runs the validators against the current values without touching
    /// anything.
    ///
    /// The error tree is replaced once, after every validator has finished.
    /// If a validator fails the errors are left as they were.
    pub async fn run_validators(&self) -> Result<Option<ErrorTree>, FormError> {
        let snapshot = self.values.get();
        let validators = lock(&self.validators).snapshot();
        let result = execute(snapshot, &validators).await?;
        self.errors
            .set(result.clone().unwrap_or_else(Value::empty_object));
        Ok(result)
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn get_field(&self, path: impl IntoPath) -> Result<Option<Value>, PathError> {
        let path = path.into_path()?;
        Ok(get(&self.values.get(), path.steps()).cloned())
    }

    /// True if the field at `path`, or a field containing it, is touched.
    ///
    /// A list field touched as a whole (`tags: true`) reports its items as
    /// touched too.
    pub fn get_touched(&self, path: impl IntoPath) -> Result<bool, PathError> {
        let path = path.into_path()?;
        let touched = self.touched.get();
        let steps = path.steps();
        Ok((0..=steps.len())
            .any(|depth| matches!(get(&touched, &steps[..depth]), Some(Value::Bool(true)))))
    }

    pub fn get_error(&self, path: impl IntoPath) -> Result<Option<Value>, PathError> {
        let path = path.into_path()?;
        Ok(get(&self.errors.get(), path.steps()).cloned())
    }

    pub fn values(&self) -> Value {
        self.values.get()
    }

    pub fn touched(&self) -> Value {
        self.touched.get()
    }

    pub fn errors(&self) -> ErrorTree {
        self.errors.get()
    }

    /// True if the values differ from the initial values.
    pub fn is_dirty(&self) -> bool {
        let values = self.values.get();
        !deep_equal(&values, &lock(&self.initial_values))
    }

    /// True if the error tree holds no messages.
    pub fn is_valid(&self) -> bool {
        is_empty_tree(&self.errors.get())
    }

    // ── Subscriptions ───────────────────────────────────────────────────

    pub fn subscribe_values<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Value) + Send + 'static,
    {
        self.values.subscribe(listener)
    }

    pub fn unsubscribe_values(&self, id: SubscriptionId) -> bool {
        self.values.unsubscribe(id)
    }

    pub fn subscribe_touched<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Value) + Send + 'static,
    {
        self.touched.subscribe(listener)
    }

    pub fn unsubscribe_touched(&self, id: SubscriptionId) -> bool {
        self.touched.unsubscribe(id)
    }

    pub fn subscribe_errors<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ErrorTree) + Send + 'static,
    {
        self.errors.subscribe(listener)
    }

    pub fn unsubscribe_errors(&self, id: SubscriptionId) -> bool {
        self.errors.unsubscribe(id)
    }

    // ── Setup ───────────────────────────────────────────────────────────

    pub fn bridge(&self) -> Option<Arc<dyn ControlBridge>> {
        lock(&self.bridge).clone()
    }

    /// Attaches (or detaches) the control bridge. A newly attached bridge
    /// receives the current values.
    pub fn set_bridge(&self, bridge: Option<Arc<dyn ControlBridge>>) {
        let attached = bridge.is_some();
        *lock(&self.bridge) = bridge;
        if attached {
            self.sync_all_controls();
        }
    }

    pub fn initial_values(&self) -> Value {
        lock(&self.initial_values).clone()
    }

    /// Replaces the baseline used by `reset`. The current trees are left
    /// alone.
    pub fn set_initial_values(&self, values: impl Into<Value>) {
        *lock(&self.initial_values) = values.into();
    }

    // ── Control sync ────────────────────────────────────────────────────

    /// Pushes `value` to the first control bound to `path`. Radio and
    /// checkbox groups receive it on every member.
    fn sync_control(&self, path: &Path, value: &Value) {
        let Some(bridge) = self.bridge() else {
            return;
        };
        let controls = bridge.controls();
        let mut bound = controls
            .iter()
            .filter(|control| control_path(control).ok().as_ref() == Some(path));
        let Some(first) = bound.next() else {
            trace!(%path, "no control bound to path");
            return;
        };
        if first.is_grouped() {
            for control in std::iter::once(first).chain(bound) {
                write_control(bridge.as_ref(), control, value);
            }
        } else {
            write_control(bridge.as_ref(), first, value);
        }
    }

    /// Pushes the current value of `path` and of everything below it.
    fn sync_controls_under(&self, path: &Path) {
        self.sync_matching(|control_path| control_path == path || path.is_child(control_path));
    }

    /// Pushes the current values to every control.
    fn sync_all_controls(&self) {
        self.sync_matching(|_| true);
    }

    fn sync_matching(&self, mut wanted: impl FnMut(&Path) -> bool) {
        let Some(bridge) = self.bridge() else {
            return;
        };
        let values = self.values.get();
        let null = Value::Null;
        let mut written = 0usize;
        for control in bridge.controls() {
            let path = match control_path(&control) {
                Ok(path) => path,
                Err(err) => {
                    trace!(name = %control.name, %err, "control name is not a path");
                    continue;
                }
            };
            if !wanted(&path) {
                continue;
            }
            let value = get(&values, path.steps()).unwrap_or(&null);
            if write_control(bridge.as_ref(), &control, value) {
                written += 1;
            }
        }
        debug!(written, "synced controls");
    }

    /// Applies `edit` to the array at `steps` in the touched and error trees,
    /// padding it with `Null` to at least `min_len` first. Trees without an
    /// array there are left alone.
    fn realign(&self, steps: &[PathStep], min_len: usize, edit: impl Fn(&mut Vec<Value>)) {
        for store in [&self.touched, &self.errors] {
            update_if_changed(store, |tree| match get(tree, steps) {
                Some(Value::Array(items)) => {
                    let mut items = items.to_vec();
                    if items.len() < min_len {
                        items.resize(min_len, Value::Null);
                    }
                    edit(&mut items);
                    set(tree, steps, Value::from(items)).unwrap_or_else(|_| tree.clone())
                }
                _ => tree.clone(),
            });
        }
    }
}

fn write_control(bridge: &dyn ControlBridge, control: &Control, value: &Value) -> bool {
    match control_write(control, value) {
        Some(write) => {
            bridge.write(control.id, write);
            true
        }
        None => false,
    }
}

struct Unchanged;

/// Stores the result of `f` unless it is the very same tree. No-op edits do
/// not notify.
fn update_if_changed<F>(store: &Store<Value>, f: F)
where
    F: FnOnce(&Value) -> Value,
{
    let _ = store.try_update(|tree| {
        let next = f(tree);
        if next.ptr_eq(tree) {
            Err(Unchanged)
        } else {
            Ok(next)
        }
    });
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("values", &self.values)
            .field("touched", &self.touched)
            .field("errors", &self.errors)
            .field("validators", &lock(&self.validators).len())
            .field("bridge", &self.bridge().is_some())
            .field("options", &self.options)
            .finish()
    }
}

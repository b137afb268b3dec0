//! The form handle.
//!
//! A [`Form`] owns the live [`FieldState`] of every field declared in its
//! [`FormSpec`]. It is cheap to clone; clones share the same state, so a
//! handle can be moved into event handlers and submit callbacks.
//!
//! # Example
//!
//! ```ignore
//! let form = Form::mount(spec, &scope);
//!
//! let submit = form.handle_submit(|values| {
//!     api.post("/posts", values.to_form_data());
//! });
//!
//! form.set_value("title", "Hello")?;
//! submit();
//! ```

mod state;
mod values;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, trace, warn};
use uuid::Uuid;

use crate::error::FormError;
use crate::scope::Scope;
use crate::spec::FormSpec;
use crate::validation::{self, InvalidField, Patterns, ValidationResult};
use crate::value::FieldValue;

pub use state::{FieldState, Fields};
pub use values::{FormDataPart, FormValues, PartBody};

/// A zero-argument submit handler returned by [`Form::handle_submit`].
pub type SubmitHandler = Arc<dyn Fn() + Send + Sync>;

/// Unique identifier of a form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormId(Uuid);

impl FormId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "form-{}", self.0)
    }
}

#[derive(Debug)]
struct FormInner {
    fields: Fields,
    /// Live revalidation is armed after the first failed submit.
    is_change_show: bool,
    closed: bool,
}

/// A form instance built from a [`FormSpec`].
#[derive(Debug, Clone)]
pub struct Form {
    id: FormId,
    spec: Arc<FormSpec>,
    patterns: Arc<Patterns>,
    inner: Arc<RwLock<FormInner>>,
    dirty: Arc<AtomicBool>,
}

impl Form {
    /// Create a form with the default email/URL patterns.
    pub fn new(spec: FormSpec) -> Self {
        Self::with_patterns(spec, Patterns::default())
    }

    pub fn with_patterns(spec: FormSpec, patterns: Patterns) -> Self {
        let form = Self {
            id: FormId::new(),
            inner: Arc::new(RwLock::new(FormInner {
                fields: Fields::from_spec(&spec),
                is_change_show: false,
                closed: false,
            })),
            spec: Arc::new(spec),
            patterns: Arc::new(patterns),
            dirty: Arc::new(AtomicBool::new(false)),
        };
        debug!("Created {} with {} fields", form.id, form.spec.len());
        form
    }

    /// Create a form that is closed when `scope` ends.
    pub fn mount(spec: FormSpec, scope: &Scope) -> Self {
        let form = Self::new(spec);
        let handle = form.clone();
        scope.on_teardown(move || handle.close());
        form
    }

    pub fn id(&self) -> FormId {
        self.id
    }

    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    fn read(&self) -> RwLockReadGuard<'_, FormInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FormInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Check if the form has changed since the last [`Form::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Snapshot of all field states.
    pub fn fields(&self) -> Fields {
        self.read().fields.clone()
    }

    /// Run `f` against the field states without cloning them.
    pub fn with_fields<R>(&self, f: impl FnOnce(&Fields) -> R) -> R {
        f(&self.read().fields)
    }

    pub fn field(&self, name: &str) -> Option<FieldState> {
        self.read().fields.get(name).cloned()
    }

    pub fn value(&self, name: &str) -> Option<FieldValue> {
        self.read().fields.get(name).map(|f| f.value.clone())
    }

    /// Whether edits currently trigger revalidation of every field.
    pub fn is_change_show(&self) -> bool {
        self.read().is_change_show
    }

    pub fn is_closed(&self) -> bool {
        self.read().closed
    }

    /// Set a field's value.
    ///
    /// While live revalidation is armed, every field is revalidated after the
    /// change.
    pub fn set_value(&self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let value = value.into();
        self.mutate(name, move |current| *current = value)
    }

    /// Modify a field's value in place.
    ///
    /// `f` works on a copy of the value and runs without the form's lock
    /// held, so it may read the form.
    pub fn update<F>(&self, name: &str, f: F) -> Result<(), FormError>
    where
        F: FnOnce(&mut FieldValue),
    {
        self.mutate(name, f)
    }

    /// Reset a field to empty, e.g. to detach a file.
    pub fn clear_value(&self, name: &str) -> Result<(), FormError> {
        self.mutate(name, |current| *current = FieldValue::Empty)
    }

    fn mutate<F>(&self, name: &str, f: F) -> Result<(), FormError>
    where
        F: FnOnce(&mut FieldValue),
    {
        let spec = self
            .spec
            .get(name)
            .ok_or_else(|| FormError::unknown_field(name))?;

        let mut value = {
            let guard = self.read();
            if guard.closed {
                return Err(FormError::Closed);
            }
            guard
                .fields
                .value(name)
                .cloned()
                .ok_or_else(|| FormError::unknown_field(name))?
        };
        f(&mut value);
        if !spec.accepts(&value) {
            return Err(FormError::type_mismatch(
                name,
                spec.expected_kind(),
                value.kind_name(),
            ));
        }

        let armed = {
            let mut guard = self.write();
            if guard.closed {
                return Err(FormError::Closed);
            }
            let field = guard
                .fields
                .get_mut(name)
                .ok_or_else(|| FormError::unknown_field(name))?;
            field.value = value;
            guard.is_change_show
        };
        self.mark_dirty();

        if armed {
            trace!("{}: revalidating after change to '{}'", self.id, name);
            self.revalidate(&self.fields());
        }
        Ok(())
    }

    /// Evaluate every field of `view` with no lock held, then apply the
    /// outcomes to the live fields.
    fn revalidate(&self, view: &Fields) -> bool {
        let outcomes = validation::evaluate_all(view, &self.spec, &self.patterns);
        let valid = validation::apply_all(&mut self.write().fields, outcomes);
        self.mark_dirty();
        valid
    }

    /// Validate one field, updating its error state.
    pub fn check_valid(&self, name: &str) -> Result<bool, FormError> {
        let spec = self
            .spec
            .get(name)
            .ok_or_else(|| FormError::unknown_field(name))?;
        let view = self.fields();
        let value = view
            .value(name)
            .ok_or_else(|| FormError::unknown_field(name))?;
        let outcome = validation::evaluate(spec, value, &view, &self.patterns);

        let mut guard = self.write();
        let field = guard
            .fields
            .get_mut(name)
            .ok_or_else(|| FormError::unknown_field(name))?;
        let valid = validation::apply_outcome(field, outcome);
        self.mark_dirty();
        Ok(valid)
    }

    /// Validate every field without arming live revalidation.
    pub fn validate(&self) -> ValidationResult {
        self.revalidate(&self.fields());
        self.read()
            .fields
            .iter()
            .filter(|f| f.is_error)
            .map(|f| InvalidField {
                field: f.name.clone(),
                message: f.error_message.clone(),
            })
            .collect()
    }

    /// Restore every field to its default and clear all errors.
    pub fn reset(&self) {
        let mut guard = self.write();
        self.reset_locked(&mut guard);
    }

    fn reset_locked(&self, inner: &mut FormInner) {
        for field in inner.fields.iter_mut() {
            if let Some(spec) = self.spec.get(&field.name) {
                field.reset(spec);
            }
        }
        inner.is_change_show = false;
        self.mark_dirty();
        debug!("{} reset", self.id);
    }

    /// Reset the form and mark it closed.
    ///
    /// Only the first call has an effect; later calls do nothing.
    pub fn close(&self) {
        let mut guard = self.write();
        if guard.closed {
            return;
        }
        self.reset_locked(&mut guard);
        guard.closed = true;
        debug!("{} closed", self.id);
    }

    /// Apply errors reported from outside, e.g. by the server.
    ///
    /// Every field named in `errors` is put in error with the given message
    /// (empty when `None`). Fields not named have their error cleared. Names
    /// that match no field are ignored.
    pub fn set_errors<I, K, V>(&self, errors: I)
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let errors: Vec<(String, String)> = errors
            .into_iter()
            .map(|(name, msg)| (name.as_ref().to_string(), msg.map_or_else(String::new, Into::into)))
            .collect();

        let mut guard = self.write();
        for (name, _) in &errors {
            if guard.fields.get(name).is_none() {
                warn!("{}: ignoring error for unknown field '{}'", self.id, name);
            }
        }
        for field in guard.fields.iter_mut() {
            if let Some((_, message)) = errors.iter().find(|(name, _)| *name == field.name) {
                field.is_error = true;
                field.error_message = message.clone();
            } else if field.is_error {
                field.clear_error();
            }
        }
        self.mark_dirty();
    }

    /// Validate and collect the values.
    ///
    /// Returns `None` and arms live revalidation when any field fails;
    /// otherwise disarms it and returns every field's value.
    pub fn submit(&self) -> Option<FormValues> {
        let view = {
            let mut guard = self.write();
            if guard.closed {
                debug!("{}: submit on closed form ignored", self.id);
                return None;
            }
            guard.is_change_show = false;
            guard.fields.clone()
        };

        let valid = self.revalidate(&view);
        if !valid {
            self.write().is_change_show = true;
            debug!("{}: submit refused, form has invalid fields", self.id);
            return None;
        }
        debug!("{}: submitting {} values", self.id, view.len());
        Some(FormValues::new(
            view.iter()
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect(),
        ))
    }

    /// Wrap `on_submit` in a zero-argument handler that validates first.
    ///
    /// `on_submit` runs only when every field is valid, and runs without any
    /// lock held, so it may call back into the form (e.g. [`Form::set_errors`]).
    pub fn handle_submit<F>(&self, on_submit: F) -> SubmitHandler
    where
        F: Fn(FormValues) + Send + Sync + 'static,
    {
        let form = self.clone();
        Arc::new(move || {
            if let Some(values) = form.submit() {
                on_submit(values);
            }
        })
    }
}

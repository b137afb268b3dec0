use serde::Serialize;

use crate::spec::{FieldSpec, FormSpec, InputType, SelectOption};
use crate::value::FieldValue;

/// Live state of one form field.
///
/// `name`, `placeholder`, `input_type` and `options` come from the field's
/// spec and never change. `value` is the user's input; `is_error` and
/// `error_message` are maintained by the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    pub name: String,
    pub placeholder: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    pub value: FieldValue,
    pub is_error: bool,
    pub error_message: String,
}

impl FieldState {
    pub fn from_spec(name: impl Into<String>, spec: &FieldSpec) -> Self {
        Self {
            name: name.into(),
            placeholder: spec.placeholder().to_string(),
            input_type: spec.input_type(),
            options: spec.options().map(<[SelectOption]>::to_vec),
            value: spec.initial_value(),
            is_error: false,
            error_message: String::new(),
        }
    }

    /// The message to render, if the field is in error.
    pub fn visible_error(&self) -> Option<&str> {
        self.is_error.then_some(self.error_message.as_str())
    }

    pub(crate) fn reset(&mut self, spec: &FieldSpec) {
        self.value = spec.initial_value();
        self.clear_error();
    }

    pub(crate) fn clear_error(&mut self) {
        self.is_error = false;
        self.error_message.clear();
    }
}

/// Field states in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields(Vec<FieldState>);

impl Fields {
    /// Fresh state for every field of `spec`.
    pub fn from_spec(spec: &FormSpec) -> Self {
        Self(
            spec.iter()
                .map(|(name, field)| FieldState::from_spec(name, field))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&FieldState> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.get(name).map(|f| &f.value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldState> {
        self.0.iter_mut().find(|f| f.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldState> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, FieldState> {
        self.0.iter_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|f| f.is_error)
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a FieldState;
    type IntoIter = std::slice::Iter<'a, FieldState>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

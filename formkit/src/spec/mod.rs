//! Declarative form configuration.
//!
//! A [`FormSpec`] is an ordered list of named [`FieldSpec`]s. Each field kind
//! is its own variant, so a checkbox cannot carry a `minLength` rule and a
//! select cannot be declared without options.
//!
//! # Example
//!
//! ```ignore
//! use formkit::prelude::*;
//!
//! let spec = FormSpec::builder()
//!     .field("mail", InputSpec::email().placeholder("Mail").rules(TextRules::new().email("Bad email")))
//!     .field("agree", CheckboxSpec::new().default_value(false).rules(FlagRules::new().required("Required")))
//!     .build()?;
//! ```

mod config;
mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::value::FieldValue;

pub use rules::{FlagRules, Format, MinLength, Required, TextRules, Threshold, ThresholdFn};

/// The HTML-ish input type of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Tel,
    Url,
    Email,
    Hidden,
    Password,
    Select,
    Radio,
    Checkbox,
    File,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Email => "email",
            Self::Hidden => "hidden",
            Self::Password => "password",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::File => "file",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a select/radio field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: FieldValue,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A free-text input: text, tel, url, email, hidden or password.
#[derive(Debug, Clone)]
pub struct InputSpec {
    input_type: InputType,
    placeholder: String,
    default: Option<FieldValue>,
    rules: TextRules,
}

impl InputSpec {
    fn with_type(input_type: InputType) -> Self {
        Self {
            input_type,
            placeholder: String::new(),
            default: None,
            rules: TextRules::default(),
        }
    }

    pub fn text() -> Self {
        Self::with_type(InputType::Text)
    }

    pub fn tel() -> Self {
        Self::with_type(InputType::Tel)
    }

    pub fn url() -> Self {
        Self::with_type(InputType::Url)
    }

    pub fn email() -> Self {
        Self::with_type(InputType::Email)
    }

    pub fn hidden() -> Self {
        Self::with_type(InputType::Hidden)
    }

    pub fn password() -> Self {
        Self::with_type(InputType::Password)
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Initial value; must be text or a number.
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn rules(mut self, rules: TextRules) -> Self {
        self.rules = rules;
        self
    }
}

/// A select or radio field.
#[derive(Debug, Clone)]
pub struct ChoiceSpec {
    input_type: InputType,
    placeholder: String,
    default: Option<FieldValue>,
    options: Vec<SelectOption>,
    rules: TextRules,
}

impl ChoiceSpec {
    fn with_type(input_type: InputType, options: Vec<SelectOption>) -> Self {
        Self {
            input_type,
            placeholder: String::new(),
            default: None,
            options,
            rules: TextRules::default(),
        }
    }

    pub fn select(options: Vec<SelectOption>) -> Self {
        Self::with_type(InputType::Select, options)
    }

    pub fn radio(options: Vec<SelectOption>) -> Self {
        Self::with_type(InputType::Radio, options)
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn rules(mut self, rules: TextRules) -> Self {
        self.rules = rules;
        self
    }
}

/// A boolean checkbox.
#[derive(Debug, Clone, Default)]
pub struct CheckboxSpec {
    placeholder: String,
    default: Option<bool>,
    rules: FlagRules,
}

impl CheckboxSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn default_value(mut self, value: bool) -> Self {
        self.default = Some(value);
        self
    }

    pub fn rules(mut self, rules: FlagRules) -> Self {
        self.rules = rules;
        self
    }
}

/// A file attachment. Files never have a default.
#[derive(Debug, Clone, Default)]
pub struct FileSpec {
    placeholder: String,
    rules: FlagRules,
}

impl FileSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn rules(mut self, rules: FlagRules) -> Self {
        self.rules = rules;
        self
    }
}

/// Configuration for one form field, tagged by kind.
#[derive(Debug, Clone)]
pub enum FieldSpec {
    Input(InputSpec),
    Choice(ChoiceSpec),
    Checkbox(CheckboxSpec),
    File(FileSpec),
}

impl FieldSpec {
    pub fn input_type(&self) -> InputType {
        match self {
            Self::Input(s) => s.input_type,
            Self::Choice(s) => s.input_type,
            Self::Checkbox(_) => InputType::Checkbox,
            Self::File(_) => InputType::File,
        }
    }

    pub fn placeholder(&self) -> &str {
        match self {
            Self::Input(s) => &s.placeholder,
            Self::Choice(s) => &s.placeholder,
            Self::Checkbox(s) => &s.placeholder,
            Self::File(s) => &s.placeholder,
        }
    }

    pub fn options(&self) -> Option<&[SelectOption]> {
        match self {
            Self::Choice(s) => Some(&s.options),
            _ => None,
        }
    }

    /// The value a fresh or reset field holds.
    pub fn initial_value(&self) -> FieldValue {
        match self {
            Self::Input(s) => s.default.clone().unwrap_or_default(),
            Self::Choice(s) => s.default.clone().unwrap_or_default(),
            Self::Checkbox(s) => s.default.map_or(FieldValue::Empty, FieldValue::Bool),
            Self::File(_) => FieldValue::Empty,
        }
    }

    /// Text rules, for text-like fields.
    pub fn text_rules(&self) -> Option<&TextRules> {
        match self {
            Self::Input(s) => Some(&s.rules),
            Self::Choice(s) => Some(&s.rules),
            _ => None,
        }
    }

    /// Flag rules, for checkbox and file fields.
    pub fn flag_rules(&self) -> Option<&FlagRules> {
        match self {
            Self::Checkbox(s) => Some(&s.rules),
            Self::File(s) => Some(&s.rules),
            _ => None,
        }
    }

    /// Human-readable description of the accepted value shapes.
    pub fn expected_kind(&self) -> &'static str {
        match self {
            Self::Input(_) => "text or number",
            Self::Choice(_) => "text, number or bool",
            Self::Checkbox(_) => "bool",
            Self::File(_) => "file",
        }
    }

    /// Whether `value` fits this field. `Empty` always fits.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (_, FieldValue::Empty) => true,
            (Self::Input(_), FieldValue::Text(_) | FieldValue::Number(_)) => true,
            (
                Self::Choice(_),
                FieldValue::Text(_) | FieldValue::Number(_) | FieldValue::Bool(_),
            ) => true,
            (Self::Checkbox(_), FieldValue::Bool(_)) => true,
            (Self::File(_), FieldValue::File(_)) => true,
            _ => false,
        }
    }

    fn check(&self, name: &str) -> Result<(), SpecError> {
        if let Self::Choice(s) = self {
            if s.options.is_empty() {
                return Err(SpecError::missing_options(name, s.input_type.as_str()));
            }
            if let Some(option) = s.options.iter().find(|o| matches!(o.value, FieldValue::File(_))) {
                return Err(SpecError::invalid_default(
                    format!("{}.{}", name, option.label),
                    self.expected_kind(),
                    option.value.kind_name(),
                ));
            }
        }
        let default = self.initial_value();
        if !self.accepts(&default) {
            return Err(SpecError::invalid_default(
                name,
                self.expected_kind(),
                default.kind_name(),
            ));
        }
        Ok(())
    }
}

impl From<InputSpec> for FieldSpec {
    fn from(spec: InputSpec) -> Self {
        Self::Input(spec)
    }
}

impl From<ChoiceSpec> for FieldSpec {
    fn from(spec: ChoiceSpec) -> Self {
        Self::Choice(spec)
    }
}

impl From<CheckboxSpec> for FieldSpec {
    fn from(spec: CheckboxSpec) -> Self {
        Self::Checkbox(spec)
    }
}

impl From<FileSpec> for FieldSpec {
    fn from(spec: FileSpec) -> Self {
        Self::File(spec)
    }
}

/// Ordered mapping of field name to field spec.
#[derive(Debug, Clone, Default)]
pub struct FormSpec {
    fields: Vec<(String, FieldSpec)>,
}

impl FormSpec {
    pub fn builder() -> FormSpecBuilder {
        FormSpecBuilder::default()
    }

    /// Parse a JSON form config.
    ///
    /// The document is an object of field name to field config; key order is
    /// the declaration order.
    ///
    /// ```json
    /// {
    ///   "mail": { "placeholder": "Mail", "rules": { "email": "This is email" } },
    ///   "agree": { "type": "checkbox", "defaultValue": false, "rules": { "required": true } }
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        config::parse(json)
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(n, spec)| (n.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collects fields and checks them in [`FormSpecBuilder::build`].
#[derive(Debug, Default)]
pub struct FormSpecBuilder {
    fields: Vec<(String, FieldSpec)>,
}

impl FormSpecBuilder {
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.fields.push((name.into(), spec.into()));
        self
    }

    pub fn build(self) -> Result<FormSpec, SpecError> {
        for (i, (name, spec)) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|(n, _)| n == name) {
                return Err(SpecError::DuplicateField(name.clone()));
            }
            spec.check(name)?;
        }
        Ok(FormSpec {
            fields: self.fields,
        })
    }
}

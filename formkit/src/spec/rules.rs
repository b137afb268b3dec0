//! Validation rules attached to field specs.
//!
//! Checkbox and file fields only know [`FlagRules`]; text-like fields use
//! [`TextRules`], which hold at most one [`Format`].

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::form::Fields;
use crate::validation::Patterns;

/// The `required` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Required {
    #[default]
    No,
    Yes,
    /// Required, with a custom error message.
    Message(String),
}

impl Required {
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::No)
    }

    /// The custom message, if one was given.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(msg) => Some(msg),
            _ => None,
        }
    }
}

impl From<bool> for Required {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

impl From<&str> for Required {
    fn from(value: &str) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<String> for Required {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

/// Rules for boolean and file fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagRules {
    pub required: Required,
}

impl FlagRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, required: impl Into<Required>) -> Self {
        self.required = required.into();
        self
    }
}

/// Threshold function for a dynamic minimum length.
///
/// Receives the field's current string and a read-only view of every field
/// of the form.
pub type ThresholdFn = Arc<dyn Fn(&str, &Fields) -> usize + Send + Sync>;

/// How the minimum length is obtained.
#[derive(Clone)]
pub enum Threshold {
    Static(usize),
    /// Computed from the field's current value and the rest of the form.
    Dynamic(ThresholdFn),
}

impl fmt::Debug for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(n) => f.debug_tuple("Static").field(n).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// The `minLength` rule.
#[derive(Debug, Clone)]
pub struct MinLength {
    pub threshold: Threshold,
    pub message: Option<String>,
}

impl MinLength {
    pub fn fixed(value: usize) -> Self {
        Self {
            threshold: Threshold::Static(value),
            message: None,
        }
    }

    /// A threshold derived from the form, e.g. half the length of another
    /// field:
    ///
    /// ```ignore
    /// MinLength::dynamic(|_, fields| {
    ///     fields.value("password").map_or(0, |v| v.to_string().chars().count() / 2)
    /// })
    /// ```
    ///
    /// The function runs without the form's lock held.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&str, &Fields) -> usize + Send + Sync + 'static,
    {
        Self {
            threshold: Threshold::Dynamic(Arc::new(f)),
            message: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Resolve the threshold for `value` within `fields`.
    pub fn resolve(&self, value: &str, fields: &Fields) -> usize {
        match &self.threshold {
            Threshold::Static(n) => *n,
            Threshold::Dynamic(f) => f(value, fields),
        }
    }
}

/// A format check. A field carries at most one.
#[derive(Debug, Clone)]
pub enum Format {
    Email(Option<String>),
    Url(Option<String>),
    Regex {
        pattern: Regex,
        message: Option<String>,
    },
}

impl Format {
    /// Rule name as written in form configs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Url(_) => "url",
            Self::Regex { .. } => "regex",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Email(msg) | Self::Url(msg) => msg.as_deref(),
            Self::Regex { message, .. } => message.as_deref(),
        }
    }

    pub fn matches(&self, value: &str, patterns: &Patterns) -> bool {
        match self {
            Self::Email(_) => patterns.is_email(value),
            Self::Url(_) => patterns.is_url(value),
            Self::Regex { pattern, .. } => pattern.is_match(value),
        }
    }
}

/// Rules for text-like fields (text, tel, url, email, hidden, password,
/// select, radio).
#[derive(Debug, Clone, Default)]
pub struct TextRules {
    pub required: Required,
    pub min_length: Option<MinLength>,
    pub format: Option<Format>,
}

impl TextRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, required: impl Into<Required>) -> Self {
        self.required = required.into();
        self
    }

    /// Require at least `value` characters.
    pub fn min_length(mut self, value: usize) -> Self {
        self.min_length = Some(MinLength::fixed(value));
        self
    }

    pub fn min_length_with(mut self, min_length: MinLength) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Require an email address. Replaces any other format rule.
    pub fn email(self, message: impl Into<String>) -> Self {
        self.format(Format::Email(Some(message.into())))
    }

    /// Require a URL. Replaces any other format rule.
    pub fn url(self, message: impl Into<String>) -> Self {
        self.format(Format::Url(Some(message.into())))
    }

    /// Require a regex match. Replaces any other format rule.
    pub fn regex(self, pattern: Regex, message: impl Into<String>) -> Self {
        self.format(Format::Regex {
            pattern,
            message: Some(message.into()),
        })
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.required.is_set() && self.min_length.is_none() && self.format.is_none()
    }
}

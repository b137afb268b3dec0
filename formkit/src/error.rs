//! Error types

/// A malformed form configuration, reported when the spec is built.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// A `select`/`radio` field was declared without options.
    #[error("Field '{field}' of type {input_type} requires at least one option")]
    MissingOptions { field: String, input_type: &'static str },

    /// Options were given for a field type that has none.
    #[error("Field '{field}' of type {input_type} does not take options")]
    OptionsNotAllowed { field: String, input_type: &'static str },

    /// A string rule was attached to a checkbox or file field.
    #[error("Rule '{rule}' is not allowed on {input_type} field '{field}'")]
    RuleNotAllowed {
        field: String,
        rule: &'static str,
        input_type: &'static str,
    },

    /// More than one of `email`, `url`, `regex` was given.
    #[error("Field '{field}' may use only one of email, url or regex")]
    ConflictingFormats { field: String },

    #[error("Field '{field}' has an invalid regex: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// The default value does not fit the field's value type.
    #[error("Field '{field}' default must be {expected}, got {actual}")]
    InvalidDefault {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("Invalid form config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SpecError {
    pub(crate) fn missing_options(field: impl Into<String>, input_type: &'static str) -> Self {
        Self::MissingOptions {
            field: field.into(),
            input_type,
        }
    }

    pub(crate) fn rule_not_allowed(
        field: impl Into<String>,
        rule: &'static str,
        input_type: &'static str,
    ) -> Self {
        Self::RuleNotAllowed {
            field: field.into(),
            rule,
            input_type,
        }
    }

    pub(crate) fn invalid_default(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::InvalidDefault {
            field: field.into(),
            expected,
            actual,
        }
    }
}

/// Error type for operations on a live form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The form has no field with this name.
    #[error("Field '{field}' not found in form")]
    UnknownField { field: String },

    /// The value shape does not fit the field.
    #[error("Field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The form was closed by its owning scope.
    #[error("Form has been closed")]
    Closed,
}

impl FormError {
    /// Creates a new unknown field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}

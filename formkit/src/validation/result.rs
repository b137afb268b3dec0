/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    /// Field name.
    pub field: String,
    /// Error message shown for the field (may be empty).
    pub message: String,
}

/// Result of validating a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// All fields passed validation.
    #[default]
    Valid,
    /// One or more fields failed validation, in declaration order.
    Invalid(Vec<InvalidField>),
}

impl ValidationResult {
    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[InvalidField] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Name of the first invalid field (for focusing).
    pub fn first_invalid_field(&self) -> Option<&str> {
        self.errors().first().map(|e| e.field.as_str())
    }
}

impl FromIterator<InvalidField> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = InvalidField>>(iter: I) -> Self {
        let errors: Vec<_> = iter.into_iter().collect();
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }
}

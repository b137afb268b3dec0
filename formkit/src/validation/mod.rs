//! Field validation.
//!
//! Rules are evaluated per field by [`evaluate`], against a read-only view of
//! the whole form; [`apply_outcome`] and [`check_valid`] write the result to a
//! [`FieldState`](crate::form::FieldState) and [`validate_all`] does so for a
//! whole form.
//!
//! # Example
//!
//! ```ignore
//! use formkit::prelude::*;
//!
//! let spec = FieldSpec::from(InputSpec::text().rules(TextRules::new().min_length(5)));
//! let outcome = evaluate(&spec, &FieldValue::from("abcd"), &Fields::default(), &Patterns::default());
//! assert!(!outcome.is_valid());
//! ```

mod check;
mod patterns;
mod result;

pub use check::{Outcome, apply_outcome, check_valid, evaluate, validate_all};
pub(crate) use check::{apply_all, evaluate_all};
pub use patterns::{DEFAULT_URL_PATTERN, Patterns};
pub use result::{InvalidField, ValidationResult};

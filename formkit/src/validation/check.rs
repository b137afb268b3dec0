//! Rule evaluation for a single field.

use log::trace;

use super::Patterns;
use crate::form::{FieldState, Fields};
use crate::spec::{FieldSpec, FlagRules, FormSpec, TextRules};
use crate::value::FieldValue;

/// Result of evaluating one field's rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    /// A rule failed. `message` is the rule's custom message; without one the
    /// field keeps its previous message.
    Invalid { message: Option<String> },
}

impl Outcome {
    fn invalid(message: Option<&str>) -> Self {
        Self::Invalid {
            message: message.map(str::to_string),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Evaluate `value` against the rules of `spec`.
///
/// Rules run in a fixed order and stop at the first failure: `required`,
/// then (for text-like values) the format rule, then `minLength`. Empty
/// values that are not required always pass. `fields` is the form the value
/// belongs to; dynamic `minLength` thresholds read it.
pub fn evaluate(
    spec: &FieldSpec,
    value: &FieldValue,
    fields: &Fields,
    patterns: &Patterns,
) -> Outcome {
    if let Some(rules) = spec.flag_rules() {
        return evaluate_flag(rules, value);
    }
    match spec.text_rules() {
        Some(rules) => evaluate_text(rules, value, fields, patterns),
        None => Outcome::Valid,
    }
}

fn evaluate_flag(rules: &FlagRules, value: &FieldValue) -> Outcome {
    // Any boolean satisfies `required`, including `false`.
    let present = matches!(value, FieldValue::Bool(_) | FieldValue::File(_));
    if rules.required.is_set() && !present {
        return Outcome::invalid(rules.required.message());
    }
    Outcome::Valid
}

fn evaluate_text(
    rules: &TextRules,
    value: &FieldValue,
    fields: &Fields,
    patterns: &Patterns,
) -> Outcome {
    if rules.required.is_set() && !value.is_truthy() {
        return Outcome::invalid(rules.required.message());
    }

    if matches!(value, FieldValue::Bool(_) | FieldValue::File(_)) {
        return Outcome::Valid;
    }

    // Falsy values (empty text, zero) stringify to nothing and pass.
    if !value.is_truthy() {
        return Outcome::Valid;
    }
    let text = value.to_string();

    if let Some(format) = &rules.format {
        if !format.matches(&text, patterns) {
            return Outcome::invalid(format.message());
        }
    }

    if let Some(min_length) = &rules.min_length {
        let threshold = min_length.resolve(&text, fields);
        if text.chars().count() < threshold {
            return Outcome::invalid(min_length.message.as_deref());
        }
    }

    Outcome::Valid
}

/// Apply an evaluated outcome to `field`, updating `is_error` and
/// `error_message`. Returns whether the field is valid.
pub fn apply_outcome(field: &mut FieldState, outcome: Outcome) -> bool {
    match outcome {
        Outcome::Valid => {
            field.is_error = false;
            true
        }
        Outcome::Invalid { message } => {
            trace!("Field '{}' failed validation", field.name);
            field.is_error = true;
            if let Some(message) = message {
                field.error_message = message;
            }
            false
        }
    }
}

/// Validate one field in place against the form view `fields`.
///
/// `field` is usually the live counterpart of an entry in `fields`, which may
/// be a snapshot. Returns whether the field is valid.
pub fn check_valid(
    field: &mut FieldState,
    spec: &FieldSpec,
    fields: &Fields,
    patterns: &Patterns,
) -> bool {
    let outcome = evaluate(spec, &field.value, fields, patterns);
    apply_outcome(field, outcome)
}

/// Validate every field against `spec`, returning the updated fields.
pub fn validate_all(mut fields: Fields, spec: &FormSpec, patterns: &Patterns) -> Fields {
    let outcomes = evaluate_all(&fields, spec, patterns);
    apply_all(&mut fields, outcomes);
    fields
}

/// Evaluate every field of `fields` without modifying it.
pub(crate) fn evaluate_all(
    fields: &Fields,
    spec: &FormSpec,
    patterns: &Patterns,
) -> Vec<(String, Outcome)> {
    fields
        .iter()
        .filter_map(|field| {
            let field_spec = spec.get(&field.name)?;
            let outcome = evaluate(field_spec, &field.value, fields, patterns);
            Some((field.name.clone(), outcome))
        })
        .collect()
}

/// Apply outcomes from [`evaluate_all`]. Returns true when all of them pass.
pub(crate) fn apply_all(fields: &mut Fields, outcomes: Vec<(String, Outcome)>) -> bool {
    let mut valid = true;
    for (name, outcome) in outcomes {
        if let Some(field) = fields.get_mut(&name) {
            valid &= apply_outcome(field, outcome);
        }
    }
    valid
}

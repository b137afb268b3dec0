//! JSON form configs.
//!
//! The wire shape follows the usual front-end field config
//! (`type`, `placeholder`, `defaultValue`, `options`, `rules`) and is
//! converted into the tagged [`FieldSpec`] variants, rejecting combinations
//! the variants cannot express.

use std::fmt;

use regex::Regex;
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde_json::Value;

use super::{
    CheckboxSpec, ChoiceSpec, FieldSpec, FileSpec, FlagRules, FormSpec, Format, InputSpec,
    InputType, MinLength, Required, SelectOption, TextRules, Threshold,
};
use crate::error::SpecError;
use crate::value::FieldValue;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    #[serde(rename = "type", default)]
    input_type: InputType,
    #[serde(default)]
    placeholder: String,
    #[serde(default)]
    default_value: Option<Value>,
    #[serde(default)]
    options: Option<Vec<RawOption>>,
    #[serde(default)]
    rules: RawRules,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    label: String,
    value: Value,
}

/// `true`/`false` or a custom message.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMessage {
    Flag(bool),
    Text(String),
}

impl RawMessage {
    fn into_required(self) -> Required {
        match self {
            Self::Flag(flag) => flag.into(),
            Self::Text(msg) if msg.is_empty() => Required::No,
            Self::Text(msg) => Required::Message(msg),
        }
    }

    fn into_message(self) -> Option<String> {
        match self {
            Self::Flag(_) => None,
            Self::Text(msg) => Some(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMinLength {
    value: usize,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRegex {
    value: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRules {
    #[serde(default)]
    required: Option<RawMessage>,
    #[serde(default)]
    min_length: Option<RawMinLength>,
    #[serde(default)]
    url: Option<RawMessage>,
    #[serde(default)]
    email: Option<RawMessage>,
    #[serde(default)]
    regex: Option<RawRegex>,
}

impl RawRules {
    fn required(&mut self) -> Required {
        self.required
            .take()
            .map(RawMessage::into_required)
            .unwrap_or_default()
    }

    fn into_flag_rules(mut self, field: &str, input_type: InputType) -> Result<FlagRules, SpecError> {
        let rejected = [
            ("minLength", self.min_length.is_some()),
            ("url", self.url.is_some()),
            ("email", self.email.is_some()),
            ("regex", self.regex.is_some()),
        ];
        if let Some((rule, _)) = rejected.iter().find(|(_, present)| *present) {
            return Err(SpecError::rule_not_allowed(field, *rule, input_type.as_str()));
        }
        Ok(FlagRules {
            required: self.required(),
        })
    }

    fn into_text_rules(mut self, field: &str) -> Result<TextRules, SpecError> {
        let required = self.required();
        let formats = [self.email.is_some(), self.url.is_some(), self.regex.is_some()];
        if formats.iter().filter(|present| **present).count() > 1 {
            return Err(SpecError::ConflictingFormats {
                field: field.to_string(),
            });
        }

        let format = if let Some(email) = self.email {
            Some(Format::Email(email.into_message()))
        } else if let Some(url) = self.url {
            Some(Format::Url(url.into_message()))
        } else if let Some(regex) = self.regex {
            let pattern = Regex::new(&regex.value).map_err(|source| SpecError::InvalidPattern {
                field: field.to_string(),
                source,
            })?;
            Some(Format::Regex {
                pattern,
                message: regex.message,
            })
        } else {
            None
        };

        let min_length = self.min_length.map(|raw| MinLength {
            threshold: Threshold::Static(raw.value),
            message: raw.message,
        });

        Ok(TextRules {
            required,
            min_length,
            format,
        })
    }
}

/// Field configs in document order.
struct RawForm(Vec<(String, RawField)>);

impl<'de> Deserialize<'de> for RawForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FormVisitor;

        impl<'de> Visitor<'de> for FormVisitor {
            type Value = RawForm;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field name to field config")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawForm, A::Error> {
                let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RawField>()? {
                    fields.push(entry);
                }
                Ok(RawForm(fields))
            }
        }

        deserializer.deserialize_map(FormVisitor)
    }
}

fn json_value(field: &str, value: &Value) -> Result<FieldValue, SpecError> {
    match value {
        Value::Null => Ok(FieldValue::Empty),
        Value::Bool(b) => Ok(FieldValue::Bool(*b)),
        Value::Number(n) => Ok(n.as_f64().map_or(FieldValue::Empty, FieldValue::Number)),
        Value::String(s) => Ok(FieldValue::Text(s.clone())),
        Value::Array(_) => Err(SpecError::invalid_default(field, "text, number or bool", "array")),
        Value::Object(_) => Err(SpecError::invalid_default(field, "text, number or bool", "object")),
    }
}

fn convert(name: &str, raw: RawField) -> Result<FieldSpec, SpecError> {
    let input_type = raw.input_type;
    let default = raw
        .default_value
        .as_ref()
        .map(|v| json_value(name, v))
        .transpose()?
        .filter(|v| !v.is_empty());

    match input_type {
        InputType::Checkbox | InputType::File => {
            if raw.options.is_some() {
                return Err(SpecError::OptionsNotAllowed {
                    field: name.to_string(),
                    input_type: input_type.as_str(),
                });
            }
            let rules = raw.rules.into_flag_rules(name, input_type)?;
            if input_type == InputType::File {
                if let Some(default) = default {
                    return Err(SpecError::invalid_default(name, "no value", default.kind_name()));
                }
                return Ok(FileSpec::new().placeholder(raw.placeholder).rules(rules).into());
            }
            let default = match default {
                None => None,
                Some(FieldValue::Bool(b)) => Some(b),
                Some(other) => {
                    return Err(SpecError::invalid_default(name, "bool", other.kind_name()));
                }
            };
            Ok(FieldSpec::Checkbox(CheckboxSpec {
                placeholder: raw.placeholder,
                default,
                rules,
            }))
        }
        InputType::Select | InputType::Radio => {
            let options = match raw.options {
                Some(options) if !options.is_empty() => options
                    .into_iter()
                    .map(|o| Ok(SelectOption::new(o.label, json_value(name, &o.value)?)))
                    .collect::<Result<Vec<_>, SpecError>>()?,
                _ => return Err(SpecError::missing_options(name, input_type.as_str())),
            };
            Ok(FieldSpec::Choice(ChoiceSpec {
                input_type,
                placeholder: raw.placeholder,
                default,
                options,
                rules: raw.rules.into_text_rules(name)?,
            }))
        }
        _ => {
            if raw.options.is_some() {
                return Err(SpecError::OptionsNotAllowed {
                    field: name.to_string(),
                    input_type: input_type.as_str(),
                });
            }
            Ok(FieldSpec::Input(InputSpec {
                input_type,
                placeholder: raw.placeholder,
                default,
                rules: raw.rules.into_text_rules(name)?,
            }))
        }
    }
}

pub(super) fn parse(json: &str) -> Result<FormSpec, SpecError> {
    let RawForm(raw) = serde_json::from_str(json)?;
    let mut builder = FormSpec::builder();
    for (name, field) in raw {
        let spec = convert(&name, field)?;
        builder = builder.field(name, spec);
    }
    builder.build()
}

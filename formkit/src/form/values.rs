use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::value::{FieldValue, FilePayload};

/// Validated values handed to a submit callback, in declaration order.
///
/// Serializes as a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues(Vec<(String, FieldValue)>);

impl FormValues {
    pub(crate) fn new(values: Vec<(String, FieldValue)>) -> Self {
        Self(values)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<(String, FieldValue)> {
        self.0
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Multipart parts for a form-data request body.
    ///
    /// Falsy values (empty, `""`, `0`, `false`) are left out, files become
    /// binary parts and everything else is sent as text.
    pub fn to_form_data(&self) -> Vec<FormDataPart> {
        self.0
            .iter()
            .filter(|(_, value)| value.is_truthy())
            .map(|(name, value)| FormDataPart {
                name: name.clone(),
                body: match value {
                    FieldValue::File(file) => PartBody::File(file.clone()),
                    other => PartBody::Text(other.to_string()),
                },
            })
            .collect()
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// One part of a multipart form body.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDataPart {
    pub name: String,
    pub body: PartBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartBody {
    Text(String),
    File(FilePayload),
}

//! Field values.
//!
//! A form field holds one of a small set of value shapes: nothing yet, text,
//! a number, a boolean, or an attached file.

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// An attached binary payload (the value of a `file` field).
///
/// The bytes are shared, so cloning a payload (or the form state holding it)
/// does not copy the file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl FilePayload {
    /// Create a payload with the generic `application/octet-stream` type.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime: "application/octet-stream".to_string(),
            bytes: Arc::from(bytes.into()),
        }
    }

    /// Set the MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl Serialize for FilePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FilePayload", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("mime", &self.mime)?;
        state.serialize_field("size", &self.size())?;
        state.end()
    }
}

/// The current value of a form field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value (an untouched field without a default).
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    File(FilePayload),
}

impl FieldValue {
    /// Short name of the value shape, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::File(_) => "file",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether the value counts as "filled in".
    ///
    /// Empty text, zero, `NaN`, `false` and `Empty` are not; files always are.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Text(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
            Self::File(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FilePayload> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }
}

/// String form used by the text rules: `Empty` is `""`, files render as
/// their name.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::File(file) => f.write_str(&file.name),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::File(file) => file.serialize(serializer),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<FilePayload> for FieldValue {
    fn from(value: FilePayload) -> Self {
        Self::File(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

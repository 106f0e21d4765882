use serde_json::{Map, Value};

use crate::data::CanonicalItem;
use crate::types::FieldName;

/// One field value on a raw record.
///
/// Some feed formats wrap text in a structure carrying a `value`; that shape
/// is kept distinct so it is unwrapped in exactly one place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain textual value.
    Text(String),
    /// Text carried inside a value-holder structure.
    Wrapped(String),
}

impl FieldValue {
    /// Unwrap to the carried text.
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) | FieldValue::Wrapped(text) => text,
        }
    }

    /// Borrow the carried text.
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(text) | FieldValue::Wrapped(text) => text,
        }
    }
}

/// A named field on a raw record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawField {
    /// Field name as exposed by the producer.
    pub name: String,
    /// Field value.
    pub value: FieldValue,
}

/// Untrusted, producer-defined feed entry.
///
/// Any field may be missing; nothing about a `RawRecord` is validated until
/// it passes through the normalizer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Fields in producer order. Lookups return the first match.
    pub fields: Vec<RawField>,
}

impl RawRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plain text field.
    pub fn with_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(name, FieldValue::Text(text.into()));
        self
    }

    /// Append a wrapped text field.
    pub fn with_wrapped(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(name, FieldValue::Wrapped(text.into()));
        self
    }

    /// Append a field.
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push(RawField {
            name: name.into(),
            value,
        });
    }

    /// True when the record exposes a field called `name`.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }

    /// Build a record from a JSON object, dropping fields with no textual value.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let mut record = Self::new();
        for (name, value) in object {
            if let Some(value) = json_field_value(value) {
                record.push(name.clone(), value);
            }
        }
        record
    }
}

/// Read-only, name-keyed view over a loosely typed record.
///
/// Implementors only answer "what is field `name`"; alias probing and
/// trimming live in the provided methods so every record shape follows the
/// same rules.
pub trait RecordView {
    /// Return field `name`, or `None` when absent or not representable as text.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Trimmed text of the first alias carrying any text at all.
    ///
    /// Probing stops at that alias even when it is whitespace only, in which
    /// case the result is `None`; later aliases are not consulted.
    fn first_text(&self, aliases: &[FieldName]) -> Option<String> {
        let text = aliases.iter().find_map(|name| {
            self.field(name)
                .map(FieldValue::into_text)
                .filter(|text| !text.is_empty())
        })?;
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Trimmed text of field `name`, empty when absent.
    fn text_or_empty(&self, name: FieldName) -> String {
        self.first_text(&[name]).unwrap_or_default()
    }
}

impl RecordView for RawRecord {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.clone())
    }
}

impl RecordView for CanonicalItem {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let text = match name {
            "title" => &self.title,
            "link" => &self.link,
            "published" => &self.published,
            "summary" => &self.summary,
            "source" => &self.source,
            _ => return None,
        };
        Some(FieldValue::Text(text.clone()))
    }
}

impl RecordView for Map<String, Value> {
    fn field(&self, name: &str) -> Option<FieldValue> {
        json_field_value(self.get(name)?)
    }
}

impl RecordView for Value {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.as_object()?.field(name)
    }
}

impl<T: RecordView + ?Sized> RecordView for &T {
    fn field(&self, name: &str) -> Option<FieldValue> {
        (**self).field(name)
    }
}

/// Map a JSON value onto a field value.
///
/// Objects with a `value` key are value-holders; other objects, arrays, and
/// nulls carry no usable text.
fn json_field_value(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Null | Value::Array(_) => None,
        Value::String(text) => Some(FieldValue::Text(text.clone())),
        Value::Bool(flag) => Some(FieldValue::Text(flag.to_string())),
        Value::Number(number) => Some(FieldValue::Text(number.to_string())),
        Value::Object(inner) => match inner.get("value")? {
            Value::String(text) => Some(FieldValue::Wrapped(text.clone())),
            Value::Null => Some(FieldValue::Wrapped(String::new())),
            other => json_field_value(other).map(|value| FieldValue::Wrapped(value.into_text())),
        },
    }
}

//! Structured log fields: typed (key, value) attributes.

use std::fmt;

use serde_json::Value;

/// A single structured attribute attached to a log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

/// The primitive value types a field can carry.
///
/// `Any` holds a pre-encoded JSON value for callers that need nested
/// or otherwise non-primitive payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Any(Value),
}

impl Field {
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Field {
        Field {
            key: key.into(),
            value: FieldValue::Str(value.into()),
        }
    }

    pub fn int(key: impl Into<String>, value: i64) -> Field {
        Field {
            key: key.into(),
            value: FieldValue::Int(value),
        }
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Field {
        Field {
            key: key.into(),
            value: FieldValue::Uint(value),
        }
    }

    pub fn float(key: impl Into<String>, value: f64) -> Field {
        Field {
            key: key.into(),
            value: FieldValue::Float(value),
        }
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Field {
        Field {
            key: key.into(),
            value: FieldValue::Bool(value),
        }
    }

    pub fn any(key: impl Into<String>, value: Value) -> Field {
        Field {
            key: key.into(),
            value: FieldValue::Any(value),
        }
    }
}

impl FieldValue {
    /// JSON form, used by the JSON encoder.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::Int(n) => Value::from(*n),
            FieldValue::Uint(n) => Value::from(*n),
            FieldValue::Float(n) => Value::from(*n),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Any(v) => v.clone(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{n}"),
            FieldValue::Uint(n) => write!(f, "{n}"),
            FieldValue::Float(n) => write!(f, "{n}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Any(v) => write!(f, "{v}"),
        }
    }
}

//! The scalar carried through a sanitization pipeline.
//!
//! `Value` is a closed tagged union instead of an open "any" type. Leaf string
//! rules only accept the textual variants (`Text`, and `Bytes` holding UTF-8);
//! `Absent` stands for a typed-nil slot (an empty `Option`, a JSON `null`) and
//! makes leaf rules halt instead of failing.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::fmt;

use crate::errors::PurifyError;

/// A single scalar value read from, and written back to, a slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    /// Unsigned integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    Bool(bool),
    #[default]
    Absent,
}

impl Value {
    /// Short, human readable name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "string",
            Value::Bytes(_) => "byte sequence",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Absent => "absent value",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Coerces the value to text.
    ///
    /// Strings are borrowed as-is and byte sequences are decoded as UTF-8.
    /// Every other variant, and bytes that are not valid UTF-8, is a
    /// [`PurifyError::TypeMismatch`].
    pub fn as_text(&self) -> Result<Cow<'_, str>, PurifyError> {
        match self {
            Value::Text(s) => Ok(Cow::Borrowed(s.as_str())),
            Value::Bytes(b) => std::str::from_utf8(b)
                .map(Cow::Borrowed)
                .map_err(|_| PurifyError::TypeMismatch { found: "non-UTF-8 byte sequence" }),
            other => Err(PurifyError::TypeMismatch { found: other.kind() }),
        }
    }

    /// Owned counterpart of [`Value::as_text`].
    pub fn into_text(self) -> Result<String, PurifyError> {
        match self {
            Value::Text(s) => Ok(s),
            Value::Bytes(b) => String::from_utf8(b)
                .map_err(|_| PurifyError::TypeMismatch { found: "non-UTF-8 byte sequence" }),
            other => Err(PurifyError::TypeMismatch { found: other.kind() }),
        }
    }

    /// Reads a JSON scalar. Arrays and objects are rejected: nested keys are
    /// not addressable.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, PurifyError> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Value::Absent),
            Json::Bool(b) => Ok(Value::Bool(*b)),
            Json::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Ok(Value::Int(i)),
                (None, Some(u)) => Ok(Value::UInt(u)),
                (None, None) => Ok(Value::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Json::String(s) => Ok(Value::Text(s.clone())),
            Json::Array(_) => Err(PurifyError::NestedValue { kind: "array" }),
            Json::Object(_) => Err(PurifyError::NestedValue { kind: "object" }),
        }
    }

    /// Converts the value into JSON. Byte sequences become strings (lossy for
    /// invalid UTF-8) and non-finite floats become `null`.
    pub fn into_json(self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Text(s) => Json::String(s),
            Value::Bytes(b) => Json::String(String::from_utf8_lossy(&b).into_owned()),
            Value::Int(i) => Json::from(i),
            Value::UInt(u) => Json::from(u),
            Value::Float(f) => serde_json::Number::from_f64(f).map(Json::Number).unwrap_or(Json::Null),
            Value::Bool(b) => Json::Bool(b),
            Value::Absent => Json::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Absent => f.write_str("<absent>"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Value::UInt(u), Value::Int)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Absent, Into::into)
    }
}

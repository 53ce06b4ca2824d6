//! Tag values and their JSON wire form.
//!
//! FluidDB stores primitive values on objects: null, booleans, integers,
//! floats, strings and sets of strings. They travel as JSON under the
//! [`VALUE_CONTENT_TYPE`](crate::response::VALUE_CONTENT_TYPE) media type.

use serde_json::{Number, Value};

use crate::error::{Error, Result};

/// A primitive value attached to an object through a tag.
#[derive(Clone, Debug, PartialEq)]
pub enum TagValue {
    /// The tag is present without a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered set of strings.
    Set(Vec<String>),
}

impl TagValue {
    /// Encode as the JSON text FluidDB expects in a tag-value body.
    ///
    /// Fails with [`Error::Format`] for NaN and infinite floats, which JSON
    /// cannot represent.
    ///
    /// ```
    /// use fluiddb_core::TagValue;
    ///
    /// assert_eq!(TagValue::Null.to_json().unwrap(), "null");
    /// assert_eq!(TagValue::from("foo").to_json().unwrap(), "\"foo\"");
    /// assert_eq!(TagValue::from(vec!["a", "b"]).to_json().unwrap(), "[\"a\",\"b\"]");
    /// assert!(TagValue::from(f64::NAN).to_json().is_err());
    /// ```
    pub fn to_json(&self) -> Result<String> {
        Ok(self.to_value()?.to_string())
    }

    /// Decode a tag-value body.
    ///
    /// Fails with [`Error::Format`] for objects, nested arrays, arrays of
    /// non-strings and numbers that fit neither `i64` nor `f64`.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text.trim())?;
        Self::from_value(value)
    }

    /// The value as a [`serde_json::Value`].
    pub fn to_value(&self) -> Result<Value> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| Error::format(format!("non-finite float {f} is not a valid tag value")))?,
            Self::Str(s) => Value::String(s.clone()),
            Self::Set(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        })
    }

    /// Convert an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(Error::format(format!("unsupported number in tag value: {n}")))
                }
            }
            Value::String(s) => Ok(Self::Str(s)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(Error::format(format!(
                        "tag value sets may only contain strings, found {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Set),
            Value::Object(_) => Err(Error::format("tag values cannot be JSON objects")),
        }
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for TagValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for TagValue {
    fn from(value: Vec<String>) -> Self {
        Self::Set(value)
    }
}

impl From<Vec<&str>> for TagValue {
    fn from(value: Vec<&str>) -> Self {
        Self::Set(value.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<TagValue>> From<Option<T>> for TagValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

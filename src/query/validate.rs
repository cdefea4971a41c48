//! Shape checks for dynamically typed arguments

use crate::error::DslError;
use crate::Result;
use serde_json::Value;
use std::fmt;

/// Shape an argument is required to have
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpectedShape {
    /// Ordered sequence of any values
    Array,
    /// Plain key-value mapping
    Object,
}

impl ExpectedShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedShape::Array => "array",
            ExpectedShape::Object => "object",
        }
    }

    /// Whether `value` has this shape
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ExpectedShape::Array => value.is_array(),
            ExpectedShape::Object => value.is_object(),
        }
    }
}

impl fmt::Display for ExpectedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of a JSON value's type, as used in error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Fail with `InvalidArgumentType` unless `value` has the expected shape
pub fn check_type(value: &Value, expected: ExpectedShape) -> Result<()> {
    if expected.matches(value) {
        return Ok(());
    }
    Err(DslError::InvalidArgumentType {
        expected: expected.as_str(),
        actual: json_type_name(value),
    })
}

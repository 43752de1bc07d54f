//! Tagged dictionary values

use serde_json::{
    Number,
    Value,
};

/// A value stored under a dictionary key.
///
/// Language files are expected to contain only strings, but JSON allows any
/// value at a key. Non-text tokens are kept so loading never fails on them,
/// but they are never shown for editing and never written back on save.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    Number(Number),
    Bool(bool),
    Null,
    /// Arrays and nested objects
    Other(Value),
}

impl Token {
    /// Returns the text if this token is a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Short name of the token kind, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::Other(value) => value_kind(value),
        }
    }
}

impl From<Value> for Token {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Number(number) => Self::Number(number),
            Value::Bool(flag) => Self::Bool(flag),
            Value::Null => Self::Null,
            other @ (Value::Array(_) | Value::Object(_)) => Self::Other(other),
        }
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Short name of a JSON value kind.
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Errors shared by the scalar codecs.
//!
//! Each custom scalar converts in three directions: serializing an internal
//! value for a response, parsing a variable value, and parsing an inline
//! literal. Wire values are modelled as [`serde_json::Value`].

use serde_json::Value;

/// Errors raised while converting a scalar between wire and internal form.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScalarError {
    /// The scalar received a value of the wrong kind.
    #[error("{scalar} cannot represent a {found} value")]
    TypeMismatch {
        /// GraphQL name of the scalar.
        scalar: &'static str,
        /// Kind of the rejected value.
        found: &'static str,
    },
    /// A string did not parse as a date-time.
    #[error("{scalar} received an invalid date-time string: {value}")]
    InvalidFormat {
        /// GraphQL name of the scalar.
        scalar: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A value failed the email syntax rule.
    #[error("Invalid email address: {value}")]
    Validation {
        /// The rejected input, rendered as text.
        value: String,
    },
}

impl ScalarError {
    /// Machine-readable error code for client payloads.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::InvalidFormat { .. } => "INVALID_FORMAT",
            Self::Validation { .. } => "VALIDATION_ERROR",
        }
    }

    pub(crate) const fn type_mismatch(scalar: &'static str, value: &Value) -> Self {
        Self::TypeMismatch {
            scalar,
            found: kind_of(value),
        }
    }
}

/// Name of the JSON kind of a wire value.
#[must_use]
pub const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Render a wire value as text for error messages.
///
/// Strings are rendered without quotes.
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

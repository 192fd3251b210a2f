//! Email address type and the `Email` scalar codec.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::scalar::{ScalarError, render};

/// local-part@domain.tld with no whitespace and a single @.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// Whitespace, a second @, or a domain without an inner dot.
    #[error("email must look like local@domain.tld without whitespace")]
    Malformed,
}

/// An email address.
///
/// ## Constraints
///
/// - Non-empty, with no upper length bound
/// - Matches `^[^\s@]+@[^\s@]+\.[^\s@]+$`: exactly one @, no whitespace,
///   non-empty local part, and a domain with a dot that is neither its first
///   nor its last character
///
/// ## Examples
///
/// ```
/// use quarry_core::Email;
///
/// // Valid emails
/// assert!(Email::parse("user1@example.com").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
///
/// // Invalid emails
/// assert!(Email::parse("").is_err());             // empty
/// assert!(Email::parse("noatsign.com").is_err());  // missing @
/// assert!(Email::parse("a@b").is_err());           // no dot in domain
/// assert!(Email::parse("a b@c.com").is_err());     // whitespace
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// GraphQL name of the scalar.
    pub const SCALAR_NAME: &'static str = "Email";

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks, checked in the order the
    /// [`EmailError`] variants are declared.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        match s.split_once('@') {
            None => Err(EmailError::MissingAtSymbol),
            Some(("", _)) => Err(EmailError::EmptyLocalPart),
            Some((_, "")) => Err(EmailError::EmptyDomain),
            Some(_) if !EMAIL_PATTERN.is_match(s) => Err(EmailError::Malformed),
            Some(_) => Ok(Self(s.to_owned())),
        }
    }

    /// The address as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate a stored value on its way out to a client.
    ///
    /// # Errors
    ///
    /// Returns [`ScalarError::Validation`] carrying the value if it is not a
    /// plausible email address.
    pub fn serialize_str(value: &str) -> Result<Self, ScalarError> {
        Self::parse(value).map_err(|_| ScalarError::Validation {
            value: value.to_owned(),
        })
    }

    /// Parse a variable value.
    ///
    /// # Errors
    ///
    /// Any non-string or malformed value is a [`ScalarError::Validation`].
    pub fn parse_value(value: &Value) -> Result<Self, ScalarError> {
        match value {
            Value::String(s) => Self::serialize_str(s),
            other => Err(ScalarError::Validation {
                value: render(other),
            }),
        }
    }

    /// Parse an inline literal.
    ///
    /// # Errors
    ///
    /// A non-string literal is a [`ScalarError::TypeMismatch`]; a malformed
    /// string is a [`ScalarError::Validation`].
    pub fn parse_literal(value: &Value) -> Result<Self, ScalarError> {
        match value {
            Value::String(s) => Self::serialize_str(s),
            other => Err(ScalarError::type_mismatch(Self::SCALAR_NAME, other)),
        }
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// GraphQL scalar binding (with graphql feature)
#[cfg(feature = "graphql")]
#[async_graphql::Scalar(name = "Email")]
impl async_graphql::ScalarType for Email {
    fn parse(value: async_graphql::Value) -> async_graphql::InputValueResult<Self> {
        let wire = value
            .into_json()
            .map_err(async_graphql::InputValueError::custom)?;
        Self::parse_value(&wire).map_err(async_graphql::InputValueError::custom)
    }

    fn to_value(&self) -> async_graphql::Value {
        async_graphql::Value::String(self.0.clone())
    }
}

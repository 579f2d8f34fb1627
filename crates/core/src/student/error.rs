use std::fmt;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use thiserror::Error;

/// The reason a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The field is absent or `null`.
    Required,
    /// The field has the wrong JSON type; carries the expected type name.
    WrongType(&'static str),
    /// The field is a blank string.
    Empty,
    /// The field is not a syntactically valid email address.
    InvalidEmail,
    /// The field must be strictly greater than zero.
    NotPositive,
    /// The field does not fit the storage column.
    OutOfRange,
}

/// A validation failure for one field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field {field} {kind}")]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: &'static str, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorKind::Required => write!(f, "is required"),
            FieldErrorKind::WrongType(expected) => write!(f, "must be {expected}"),
            FieldErrorKind::Empty => write!(f, "cannot be empty"),
            FieldErrorKind::InvalidEmail => write!(f, "must be a valid email address"),
            FieldErrorKind::NotPositive => write!(f, "must be greater than 0"),
            FieldErrorKind::OutOfRange => write!(f, "is out of range"),
        }
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldError", 2)?;
        state.serialize_field("field", self.field)?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Every field error found in a payload, in field order.
///
/// Never empty when returned from the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

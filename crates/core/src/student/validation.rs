//! Field-level validation for student payloads.
//!
//! Validation works on the untyped JSON body so that every field can be
//! checked independently. All violations are collected before returning.

use regex::Regex;
use serde_json::{Map, Value};

use super::error::{FieldError, FieldErrorKind, ValidationErrors};
use super::types::NewStudent;

/// Email syntax accepted by the service (the WHATWG `input[type=email]` rule).
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$";

/// Validates student payloads.
///
/// Build one at startup and share it; it holds no mutable state.
///
/// # Examples
///
/// ```
/// use students_core::student::StudentValidator;
///
/// let validator = StudentValidator::new();
/// let payload = serde_json::json!({"name": "Ana", "email": "ana@x.com", "age": 21});
///
/// let student = validator.validate(&payload).unwrap();
/// assert_eq!(student.name, "Ana");
///
/// let errors = validator
///     .validate(&serde_json::json!({"email": "bad"}))
///     .unwrap_err();
/// assert_eq!(errors.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct StudentValidator {
    email: Regex,
}

impl StudentValidator {
    pub fn new() -> Self {
        Self {
            email: Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"),
        }
    }

    /// Returns true if `email` is a syntactically valid address.
    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email.is_match(email)
    }

    /// Validates a JSON object and converts it into a [`NewStudent`].
    ///
    /// Unknown fields are ignored. The caller is responsible for rejecting
    /// payloads that are not JSON objects; any non-object value is treated as
    /// an object with no fields.
    pub fn validate(&self, payload: &Value) -> Result<NewStudent, ValidationErrors> {
        let empty = Map::new();
        let fields = payload.as_object().unwrap_or(&empty);
        let mut errors = ValidationErrors::new();

        let name = collect(&mut errors, validate_name(fields.get("name")));
        let email = collect(&mut errors, self.validate_email(fields.get("email")));
        let age = collect(&mut errors, validate_age(fields.get("age")));

        match (name, email, age) {
            (Some(name), Some(email), Some(age)) => Ok(NewStudent { name, email, age }),
            _ => Err(errors),
        }
    }

    fn validate_email(&self, value: Option<&Value>) -> Result<String, FieldError> {
        let email = required_string("email", value)?;
        if email.trim().is_empty() {
            return Err(FieldError::new("email", FieldErrorKind::Empty));
        }
        if !self.is_valid_email(email) {
            return Err(FieldError::new("email", FieldErrorKind::InvalidEmail));
        }
        Ok(email.to_string())
    }
}

impl Default for StudentValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn collect<T>(errors: &mut ValidationErrors, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

fn required_string<'a>(
    field: &'static str,
    value: Option<&'a Value>,
) -> Result<&'a str, FieldError> {
    let field_error = |kind| FieldError::new(field, kind);

    match value {
        None | Some(Value::Null) => Err(field_error(FieldErrorKind::Required)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(field_error(FieldErrorKind::WrongType("a string"))),
    }
}

fn validate_name(value: Option<&Value>) -> Result<String, FieldError> {
    let name = required_string("name", value)?;
    if name.trim().is_empty() {
        return Err(FieldError::new("name", FieldErrorKind::Empty));
    }
    Ok(name.to_string())
}

fn validate_age(value: Option<&Value>) -> Result<i32, FieldError> {
    let age_error = |kind| FieldError::new("age", kind);

    let number = match value {
        None | Some(Value::Null) => return Err(age_error(FieldErrorKind::Required)),
        Some(Value::Number(n)) => n,
        Some(_) => return Err(age_error(FieldErrorKind::WrongType("an integer"))),
    };

    match number.as_i64() {
        Some(age) if age <= 0 => Err(age_error(FieldErrorKind::NotPositive)),
        Some(age) => i32::try_from(age).map_err(|_| age_error(FieldErrorKind::OutOfRange)),
        // Positive integers beyond i64 still parse as u64.
        None if number.as_u64().is_some() => Err(age_error(FieldErrorKind::OutOfRange)),
        None => Err(age_error(FieldErrorKind::WrongType("an integer"))),
    }
}

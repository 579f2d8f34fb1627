mod error;
mod types;
mod validation;

pub use error::{FieldError, FieldErrorKind, ValidationErrors};
pub use types::{NewStudent, Student};
pub use validation::StudentValidator;

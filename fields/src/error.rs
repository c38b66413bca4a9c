use thiserror::Error;

use crate::validation::FieldErrors;

pub type Result<T> = std::result::Result<T, FieldsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldsError {
    #[error("Field validation error: {0}")]
    Validation(FieldErrors),
}

impl FieldsError {
    /// Per-field messages carried by the error.
    pub fn field_errors(&self) -> &FieldErrors {
        match self {
            FieldsError::Validation(errors) => errors,
        }
    }
}

use fields::{FieldErrors, FieldsError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("User not found with id: {0}")]
    UserNotFound(i64),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User {0} still owns job postings")]
    UserOwnsJobs(i64),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<FieldsError> for UserError {
    fn from(err: FieldsError) -> Self {
        match err {
            FieldsError::Validation(errors) => UserError::Validation(errors),
        }
    }
}

pub type Result<T> = std::result::Result<T, UserError>;

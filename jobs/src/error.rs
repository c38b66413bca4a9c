//! Error types for job catalog operations

use fields::{FieldErrors, FieldsError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobError {
    /// Lookup or search came back empty where a result is required.
    #[error("{0}")]
    NotFound(String),

    /// The caller may not perform the operation.
    #[error("{0}")]
    Forbidden(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl JobError {
    pub fn job_not_found(id: i64) -> Self {
        JobError::NotFound(format!("Job not found with id: {}", id))
    }
}

impl From<FieldsError> for JobError {
    fn from(err: FieldsError) -> Self {
        match err {
            FieldsError::Validation(errors) => JobError::Validation(errors),
        }
    }
}

pub type Result<T> = std::result::Result<T, JobError>;

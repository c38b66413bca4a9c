//! Error types for the authorization system.
//!
//! These never reach HTTP clients: the capability helpers turn every error
//! into a deny and log it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    /// The policy text did not parse.
    #[error("Policy parsing failed: {0}")]
    PolicyParse(String),

    /// A principal, action or resource could not be turned into a Cedar entity.
    #[error("Entity creation failed: {0}")]
    EntityCreation(String),

    #[error("Authorization evaluation failed: {0}")]
    EvaluationError(String),
}

/// A specialized Result type for authorization operations.
pub type Result<T> = std::result::Result<T, AuthzError>;

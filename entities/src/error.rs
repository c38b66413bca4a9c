use thiserror::Error;

pub type Result<T> = std::result::Result<T, EntitiesError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntitiesError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown job type: {0}")]
    UnknownJobType(String),
}

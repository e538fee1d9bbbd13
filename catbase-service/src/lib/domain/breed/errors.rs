use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BreedIdError {
    #[error("Invalid breed id: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BreedNameError {
    #[error("Breed name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Breed name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error)]
pub enum BreedError {
    #[error("Invalid breed ID: {0}")]
    InvalidBreedId(#[from] BreedIdError),

    #[error("Invalid breed name: {0}")]
    InvalidName(#[from] BreedNameError),

    #[error("Breed not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating for '{axis}' must be between 0 and 5, got {value}")]
    OutOfRange { axis: String, value: i64 },

    #[error("Rating axis name must not be blank")]
    BlankAxis,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

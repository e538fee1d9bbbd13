use thiserror::Error;

use crate::rating::errors::RatingError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscussionIdError {
    #[error("Invalid discussion id: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("Message must not be empty")]
    Empty,

    #[error("Message too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error)]
pub enum DiscussionError {
    #[error("Invalid discussion ID: {0}")]
    InvalidDiscussionId(#[from] DiscussionIdError),

    #[error("Invalid message: {0}")]
    InvalidMessage(#[from] MessageError),

    #[error("Invalid ratings: {0}")]
    InvalidRatings(#[from] RatingError),

    /// Missing, deleted, or not editable by the caller.
    #[error("Discussion not found: {0}")]
    NotFound(String),

    #[error("Invalid parent discussion: {0}")]
    InvalidParent(String),

    /// The write committed but the breed's averages could not be rebuilt.
    #[error("Rating aggregation failed: {0}")]
    AggregationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReactionError {
    #[error("Invalid reaction type '{0}', expected 'like' or 'dislike'")]
    InvalidReactionType(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The stored reaction kept changing underneath every retry.
    #[error("Reaction is being modified concurrently, try again")]
    Contended,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

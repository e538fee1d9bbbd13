use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Unexpected token type: expected {expected}, got {actual}")]
    WrongTokenType {
        expected: &'static str,
        actual: &'static str,
    },
}

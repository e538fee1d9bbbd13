use thiserror::Error;

use crate::user::errors::UserError;

/// Errors surfaced by login, refresh and logout.
///
/// `InvalidCredentials` and `AccountDisabled` are kept apart for logging; the
/// HTTP layer reports both identically.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for SessionError {
    fn from(error: UserError) -> Self {
        SessionError::Internal(error.to_string())
    }
}

impl From<auth::JwtError> for SessionError {
    fn from(error: auth::JwtError) -> Self {
        SessionError::Internal(error.to_string())
    }
}

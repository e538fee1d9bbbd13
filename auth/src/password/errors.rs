use thiserror::Error;

/// Credential verifier failures.
///
/// A password mismatch is not an error: `verify` returns `Ok(false)`.
/// Messages never carry the password or the digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

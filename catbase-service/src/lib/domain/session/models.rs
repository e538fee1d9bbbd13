use std::fmt;

use auth::IssuedToken;
use sha2::Digest;
use sha2::Sha256;

use crate::domain::user::models::Roles;
use crate::domain::user::models::User;

/// Raw refresh token as handed to the client.
///
/// Only its fingerprint is ever persisted. `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 of the token, hex encoded.
    pub fn fingerprint(&self) -> TokenFingerprint {
        TokenFingerprint(hex::encode(Sha256::digest(self.0.as_bytes())))
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken(***)")
    }
}

impl From<IssuedToken> for RefreshToken {
    fn from(issued: IssuedToken) -> Self {
        Self(issued.token)
    }
}

/// Ledger key for a refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenFingerprint(String);

impl TokenFingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Login credentials exactly as submitted.
///
/// The username is not validated here so malformed input fails the same way
/// as an unknown account.
#[derive(Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Result of a successful login: both credentials are live.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub roles: Roles,
    pub access_token: IssuedToken,
    pub refresh_token: IssuedToken,
}

/// Result of a successful refresh.
///
/// `refresh_token` is only set when rotation is enabled.
#[derive(Debug, Clone)]
pub struct RefreshedSession {
    pub user: User,
    pub roles: Roles,
    pub access_token: IssuedToken,
    pub refresh_token: Option<IssuedToken>,
}

/// Session behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionPolicy {
    pub rotate_refresh_tokens: bool,
}

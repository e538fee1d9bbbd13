use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Which credential a token is.
///
/// Access and refresh tokens share one signing key, so the type travels in the
/// claims and every verifier checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// Signed token payload.
///
/// `roles` is a snapshot taken when the token was minted; it is not refreshed
/// when role assignments change, so an access token may carry stale roles for
/// at most its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (numeric identity id, as a string per RFC 7519)
    pub sub: String,

    pub username: String,

    #[serde(default)]
    pub roles: Vec<String>,

    pub token_type: TokenType,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Unique token identifier
    pub jti: String,
}

impl TokenClaims {
    /// Claims for a short-lived access token.
    ///
    /// # Arguments
    /// * `user_id` - Identity id
    /// * `username` - Username at issue time
    /// * `roles` - Role snapshot embedded in the token
    /// * `issuer` - Issuer string checked on verification
    /// * `now` - Issue instant
    /// * `ttl` - Token lifetime
    pub fn access(
        user_id: i64,
        username: impl Into<String>,
        roles: Vec<String>,
        issuer: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self::build(user_id, username.into(), roles, TokenType::Access, issuer.into(), now, ttl)
    }

    /// Claims for a refresh token. Refresh tokens carry no roles; roles are
    /// re-read from storage on every refresh.
    pub fn refresh(
        user_id: i64,
        username: impl Into<String>,
        issuer: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self::build(
            user_id,
            username.into(),
            Vec::new(),
            TokenType::Refresh,
            issuer.into(),
            now,
            ttl,
        )
    }

    fn build(
        user_id: i64,
        username: String,
        roles: Vec<String>,
        token_type: TokenType,
        iss: String,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            username,
            roles,
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Parse the numeric identity id out of `sub`.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_default()
    }
}

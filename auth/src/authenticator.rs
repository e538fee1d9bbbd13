use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;
use crate::jwt::TokenType;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetimes and issuer applied to every minted token.
#[derive(Debug, Clone)]
pub struct TokenPolicy {
    pub issuer: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            issuer: "catbase-api".to_string(),
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
        }
    }
}

/// A freshly signed token together with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

/// Credential verifier plus token issuer/verifier.
///
/// Built once at startup from the signing secret and shared read-only for the
/// rest of the process.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    policy: TokenPolicy,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `policy` - Issuer and token lifetimes
    pub fn new(jwt_secret: &[u8], policy: TokenPolicy) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, policy.issuer.clone()),
            policy,
        }
    }

    pub fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored digest could not be parsed
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Pay the cost of a password check for an account that does not exist.
    pub fn verify_password_for_unknown_user(&self, password: &str) {
        self.password_hasher.verify_decoy(password);
    }

    /// Mint an access token carrying a role snapshot.
    pub fn issue_access(
        &self,
        user_id: i64,
        username: &str,
        roles: &[String],
    ) -> Result<IssuedToken, JwtError> {
        let claims = TokenClaims::access(
            user_id,
            username,
            roles.to_vec(),
            self.policy.issuer.clone(),
            Utc::now(),
            self.policy.access_ttl,
        );
        self.sign(&claims)
    }

    /// Mint a refresh token.
    pub fn issue_refresh(&self, user_id: i64, username: &str) -> Result<IssuedToken, JwtError> {
        let claims = TokenClaims::refresh(
            user_id,
            username,
            self.policy.issuer.clone(),
            Utc::now(),
            self.policy.refresh_ttl,
        );
        self.sign(&claims)
    }

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Bad signature, expired, malformed, or not an access token
    pub fn verify_access(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.verify(token, TokenType::Access)
    }

    /// Validate a refresh token's signature, expiry and type.
    ///
    /// This does not consult the ledger; revocation is checked by the caller.
    pub fn verify_refresh(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.verify(token, TokenType::Refresh)
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<TokenClaims, JwtError> {
        let claims = self.jwt_handler.decode(token)?;
        if claims.token_type != expected {
            return Err(JwtError::WrongTokenType {
                expected: expected.as_str(),
                actual: claims.token_type.as_str(),
            });
        }
        Ok(claims)
    }

    fn sign(&self, claims: &TokenClaims) -> Result<IssuedToken, JwtError> {
        Ok(IssuedToken {
            token: self.jwt_handler.encode(claims)?,
            expires_at: claims.expires_at(),
        })
    }
}

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::audit::AuditContext;
use crate::domain::session::models::AuthenticatedSession;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::RefreshedSession;
use crate::domain::session::models::TokenFingerprint;
use crate::domain::user::models::UserId;
use crate::session::errors::SessionError;

/// Port for the session orchestrator.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Exchange a username and password for an access/refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `AccountDisabled` - Password matched but the account is inactive
    /// * `Internal` - Storage or signing failed
    async fn login(
        &self,
        command: LoginCommand,
        context: AuditContext,
    ) -> Result<AuthenticatedSession, SessionError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// Roles and account state are re-read, so changes since login apply.
    ///
    /// # Errors
    /// * `InvalidOrExpiredToken` - Malformed, expired, revoked, or unknown token
    /// * `Internal` - Storage or signing failed
    async fn refresh(
        &self,
        token: RefreshToken,
        context: AuditContext,
    ) -> Result<RefreshedSession, SessionError>;

    /// Revoke the refresh token if one was presented. Never fails.
    async fn logout(&self, token: Option<RefreshToken>, context: AuditContext);
}

/// Persistent record of issued refresh tokens.
#[async_trait]
pub trait RefreshTokenLedger: Send + Sync + 'static {
    /// Record a newly issued token. Existing tokens for the user stay valid.
    async fn store(
        &self,
        user_id: UserId,
        fingerprint: &TokenFingerprint,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionError>;

    /// Owner of the token if it is unexpired and unrevoked, checked in one read.
    async fn find_valid(
        &self,
        fingerprint: &TokenFingerprint,
    ) -> Result<Option<UserId>, SessionError>;

    /// Mark the token revoked.
    ///
    /// # Returns
    /// The owner when this call revoked it; `None` for unknown or
    /// already-revoked tokens.
    async fn revoke(&self, fingerprint: &TokenFingerprint)
        -> Result<Option<UserId>, SessionError>;

    /// Revoke `old` and store `new` atomically.
    ///
    /// # Returns
    /// `false` (and no changes) if `old` was no longer valid.
    async fn rotate(
        &self,
        old: &TokenFingerprint,
        user_id: UserId,
        new: &TokenFingerprint,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, SessionError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::audit::record_best_effort;
use crate::domain::audit::AuditContext;
use crate::domain::audit::AuditEntry;
use crate::domain::audit::AuditLog;
use crate::domain::session::models::AuthenticatedSession;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::RefreshedSession;
use crate::domain::session::models::SessionPolicy;
use crate::domain::user::models::UserId;
use crate::session::errors::SessionError;
use crate::session::ports::RefreshTokenLedger;
use crate::session::ports::SessionServicePort;
use crate::user::ports::UserRepository;

/// Login, refresh and logout over the user store and the refresh-token ledger.
pub struct SessionService<UR, RL, AL>
where
    UR: UserRepository,
    RL: RefreshTokenLedger,
    AL: AuditLog,
{
    users: Arc<UR>,
    ledger: Arc<RL>,
    audit_log: Arc<AL>,
    authenticator: Arc<auth::Authenticator>,
    policy: SessionPolicy,
}

impl<UR, RL, AL> SessionService<UR, RL, AL>
where
    UR: UserRepository,
    RL: RefreshTokenLedger,
    AL: AuditLog,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `users` - User lookup, roles and last-login stamping
    /// * `ledger` - Refresh token persistence
    /// * `audit_log` - Audit trail sink
    /// * `authenticator` - Password verifier and token issuer
    /// * `policy` - Rotation switch
    pub fn new(
        users: Arc<UR>,
        ledger: Arc<RL>,
        audit_log: Arc<AL>,
        authenticator: Arc<auth::Authenticator>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            users,
            ledger,
            audit_log,
            authenticator,
            policy,
        }
    }
}

#[async_trait]
impl<UR, RL, AL> SessionServicePort for SessionService<UR, RL, AL>
where
    UR: UserRepository,
    RL: RefreshTokenLedger,
    AL: AuditLog,
{
    async fn login(
        &self,
        command: LoginCommand,
        context: AuditContext,
    ) -> Result<AuthenticatedSession, SessionError> {
        let Some(user) = self.users.find_by_username(&command.username).await? else {
            self.authenticator
                .verify_password_for_unknown_user(&command.password);
            tracing::info!(username = %command.username, "Login failed: unknown username");
            return Err(SessionError::InvalidCredentials);
        };

        match self
            .authenticator
            .verify_password(&command.password, &user.password_hash)
        {
            Ok(()) => {}
            Err(auth::AuthenticationError::InvalidCredentials) => {
                tracing::info!(user_id = %user.id, "Login failed: password mismatch");
                return Err(SessionError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password digest unusable");
                return Err(SessionError::Internal(e.to_string()));
            }
        }

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Login refused: account disabled");
            return Err(SessionError::AccountDisabled);
        }

        let roles = self.users.roles_for(&user.id).await?;
        let access_token =
            self.authenticator
                .issue_access(user.id.0, user.username.as_str(), roles.as_slice())?;
        let refresh_token = self
            .authenticator
            .issue_refresh(user.id.0, user.username.as_str())?;

        let fingerprint = RefreshToken::from(refresh_token.clone()).fingerprint();
        self.ledger
            .store(user.id, &fingerprint, refresh_token.expires_at)
            .await?;

        if let Err(e) = self.users.record_login(&user.id, Utc::now()).await {
            tracing::warn!(user_id = %user.id, error = %e, "Failed to record last login");
        }

        record_best_effort(
            self.audit_log.as_ref(),
            AuditEntry::auth(
                user.id,
                "login",
                json!({ "username": user.username.as_str() }),
                context,
            ),
        )
        .await;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthenticatedSession {
            user,
            roles,
            access_token,
            refresh_token,
        })
    }

    async fn refresh(
        &self,
        token: RefreshToken,
        _context: AuditContext,
    ) -> Result<RefreshedSession, SessionError> {
        let claims = self
            .authenticator
            .verify_refresh(token.as_str())
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                SessionError::InvalidOrExpiredToken
            })?;
        let subject = claims
            .user_id()
            .map(UserId)
            .ok_or(SessionError::InvalidOrExpiredToken)?;

        let fingerprint = token.fingerprint();
        match self.ledger.find_valid(&fingerprint).await? {
            Some(owner) if owner == subject => {}
            Some(owner) => {
                tracing::warn!(
                    owner = %owner,
                    subject = %subject,
                    "Refresh token ledger owner does not match claims"
                );
                return Err(SessionError::InvalidOrExpiredToken);
            }
            None => {
                tracing::debug!(user_id = %subject, "Refresh token revoked, expired or unknown");
                return Err(SessionError::InvalidOrExpiredToken);
            }
        }

        let user = match self.users.find_by_id(&subject).await? {
            Some(user) if user.is_active => user,
            Some(_) => {
                tracing::warn!(user_id = %subject, "Refresh refused: account disabled");
                return Err(SessionError::InvalidOrExpiredToken);
            }
            None => return Err(SessionError::InvalidOrExpiredToken),
        };
        let roles = self.users.roles_for(&user.id).await?;

        let access_token =
            self.authenticator
                .issue_access(user.id.0, user.username.as_str(), roles.as_slice())?;

        let refresh_token = if self.policy.rotate_refresh_tokens {
            let next = self
                .authenticator
                .issue_refresh(user.id.0, user.username.as_str())?;
            let next_fingerprint = RefreshToken::from(next.clone()).fingerprint();
            let rotated = self
                .ledger
                .rotate(&fingerprint, user.id, &next_fingerprint, next.expires_at)
                .await?;
            if !rotated {
                tracing::warn!(user_id = %user.id, "Refresh token reused during rotation");
                return Err(SessionError::InvalidOrExpiredToken);
            }
            Some(next)
        } else {
            None
        };

        tracing::debug!(user_id = %user.id, rotated = refresh_token.is_some(), "Session refreshed");

        Ok(RefreshedSession {
            user,
            roles,
            access_token,
            refresh_token,
        })
    }

    async fn logout(&self, token: Option<RefreshToken>, context: AuditContext) {
        let Some(token) = token else {
            tracing::debug!("Logout without refresh token");
            return;
        };

        match self.ledger.revoke(&token.fingerprint()).await {
            Ok(Some(user_id)) => {
                tracing::info!(user_id = %user_id, "User logged out");
                record_best_effort(
                    self.audit_log.as_ref(),
                    AuditEntry::auth(user_id, "logout", json!({}), context),
                )
                .await;
            }
            Ok(None) => tracing::debug!("Logout with unknown or already revoked token"),
            Err(e) => tracing::warn!(error = %e, "Failed to revoke refresh token on logout"),
        }
    }
}

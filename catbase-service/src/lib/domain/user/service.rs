use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::audit::record_best_effort;
use crate::domain::audit::AuditContext;
use crate::domain::audit::AuditEntry;
use crate::domain::audit::AuditLog;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::DEFAULT_ROLE;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR, AL>
where
    UR: UserRepository,
    AL: AuditLog,
{
    repository: Arc<UR>,
    audit_log: Arc<AL>,
    authenticator: Arc<auth::Authenticator>,
}

impl<UR, AL> UserService<UR, AL>
where
    UR: UserRepository,
    AL: AuditLog,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `audit_log` - Audit trail sink
    /// * `authenticator` - Shared credential hasher
    pub fn new(
        repository: Arc<UR>,
        audit_log: Arc<AL>,
        authenticator: Arc<auth::Authenticator>,
    ) -> Self {
        Self {
            repository,
            audit_log,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, AL> UserServicePort for UserService<UR, AL>
where
    UR: UserRepository,
    AL: AuditLog,
{
    async fn register(
        &self,
        command: RegisterUserCommand,
        context: AuditContext,
    ) -> Result<User, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| UserError::PasswordHashing(e.to_string()))?;

        let new_user = NewUser {
            username: command.username,
            email: command.email,
            password_hash,
        };

        let user = self
            .repository
            .create_with_role(new_user, DEFAULT_ROLE)
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        record_best_effort(
            self.audit_log.as_ref(),
            AuditEntry::auth(
                user.id,
                "register",
                json!({ "username": user.username.as_str() }),
                context,
            ),
        )
        .await;

        Ok(user)
    }

    async fn get_profile(&self, id: &UserId) -> Result<UserProfile, UserError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;
        let roles = self.repository.roles_for(id).await?;

        Ok(UserProfile { user, roles })
    }
}

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::audit::AuditContext;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Roles;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with the default role.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    /// * `context` - Caller address and user agent for the audit trail
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(
        &self,
        command: RegisterUserCommand,
        context: AuditContext,
    ) -> Result<User, UserError>;

    /// Retrieve a user together with their current roles.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, id: &UserId) -> Result<UserProfile, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a user and grant them `role` in a single transaction.
    ///
    /// Nothing is persisted unless both steps succeed.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_with_role(&self, user: NewUser, role: &str) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// Takes the raw login input; a string that is not a valid username simply
    /// matches nothing.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;

    /// Current role names assigned to the user.
    async fn roles_for(&self, id: &UserId) -> Result<Roles, UserError>;

    /// Stamp the last successful login.
    async fn record_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), UserError>;
}

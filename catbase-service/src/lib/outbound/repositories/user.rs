use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Roles;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(r.id),
            username: Username::new(r.username)?,
            email: EmailAddress::new(r.email)?,
            password_hash: r.password_hash,
            is_active: r.is_active,
            created_at: r.created_at,
            last_login: r.last_login,
        })
    }
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, is_active, created_at, last_login";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_with_role(&self, user: NewUser, role: &str) -> Result<User, UserError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return UserError::UsernameAlreadyExists(
                            user.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                    }
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        let granted = sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            SELECT $1, id FROM roles WHERE name = $2
            "#,
        )
        .bind(row.id)
        .bind(role)
        .execute(&mut *tx)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        // Dropping the transaction rolls back the user insert.
        if granted.rows_affected() == 0 {
            return Err(UserError::DatabaseError(format!(
                "role '{}' does not exist",
                role
            )));
        }

        tx.commit()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn roles_for(&self, id: &UserId) -> Result<Roles, UserError> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            "#,
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(Roles::new(names))
    }

    async fn record_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), UserError> {
        sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(id.0)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

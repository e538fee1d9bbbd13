use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::session::models::TokenFingerprint;
use crate::domain::session::ports::RefreshTokenLedger;
use crate::domain::user::models::UserId;
use crate::session::errors::SessionError;

/// Refresh tokens keyed by SHA-256 fingerprint. Revocation sets
/// `revoked_at`; rows are never deleted here.
pub struct PostgresRefreshTokenLedger {
    pool: PgPool,
}

impl PostgresRefreshTokenLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn internal(e: sqlx::Error) -> SessionError {
    SessionError::Internal(e.to_string())
}

#[async_trait]
impl RefreshTokenLedger for PostgresRefreshTokenLedger {
    async fn store(
        &self,
        user_id: UserId,
        fingerprint: &TokenFingerprint,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id.0)
        .bind(fingerprint.as_str())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(internal)?;

        Ok(())
    }

    async fn find_valid(
        &self,
        fingerprint: &TokenFingerprint,
    ) -> Result<Option<UserId>, SessionError> {
        let user_id: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM refresh_tokens
            WHERE token_hash = $1 AND expires_at > NOW() AND revoked_at IS NULL
            "#,
        )
        .bind(fingerprint.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;

        Ok(user_id.map(UserId))
    }

    async fn revoke(
        &self,
        fingerprint: &TokenFingerprint,
    ) -> Result<Option<UserId>, SessionError> {
        let user_id: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE token_hash = $1 AND revoked_at IS NULL
            RETURNING user_id
            "#,
        )
        .bind(fingerprint.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;

        Ok(user_id.map(UserId))
    }

    async fn rotate(
        &self,
        old: &TokenFingerprint,
        user_id: UserId,
        new: &TokenFingerprint,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, SessionError> {
        let mut tx = self.pool.begin().await.map_err(internal)?;

        let revoked = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE token_hash = $1 AND user_id = $2
              AND expires_at > NOW() AND revoked_at IS NULL
            "#,
        )
        .bind(old.as_str())
        .bind(user_id.0)
        .execute(&mut *tx)
        .await
        .map_err(internal)?;

        if revoked.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id.0)
        .bind(new.as_str())
        .bind(expires_at)
        .execute(&mut *tx)
        .await
        .map_err(internal)?;

        tx.commit().await.map_err(internal)?;
        Ok(true)
    }
}

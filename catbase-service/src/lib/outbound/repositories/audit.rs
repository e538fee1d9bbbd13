use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::audit::AuditEntry;
use crate::domain::audit::AuditError;
use crate::domain::audit::AuditLog;

pub struct PostgresAuditLog {
    pool: PgPool,
}

impl PostgresAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLog for PostgresAuditLog {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs
                (user_id, action, resource, resource_id, details, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.user_id.0)
        .bind(entry.action)
        .bind(entry.resource)
        .bind(entry.resource_id)
        .bind(Json(entry.details))
        .bind(entry.context.ip_address)
        .bind(entry.context.user_agent)
        .execute(&self.pool)
        .await
        .map_err(|e| AuditError::WriteFailed(e.to_string()))?;

        Ok(())
    }
}

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::user::models::UserId;

/// Who is calling, as far as the transport can tell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditContext {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// One row of the audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub user_id: UserId,
    pub action: &'static str,
    pub resource: &'static str,
    pub resource_id: Option<String>,
    pub details: Value,
    pub context: AuditContext,
}

impl AuditEntry {
    pub fn auth(
        user_id: UserId,
        action: &'static str,
        details: Value,
        context: AuditContext,
    ) -> Self {
        Self {
            user_id,
            action,
            resource: "auth",
            resource_id: None,
            details,
            context,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuditError {
    #[error("Failed to write audit record: {0}")]
    WriteFailed(String),
}

/// Audit trail sink.
///
/// Callers treat failures as non-fatal: they are logged and the request
/// proceeds.
#[async_trait]
pub trait AuditLog: Send + Sync + 'static {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError>;
}

/// Write an audit record, logging instead of propagating failures.
pub async fn record_best_effort<AL: AuditLog + ?Sized>(audit_log: &AL, entry: AuditEntry) {
    let action = entry.action;
    let user_id = entry.user_id;
    if let Err(e) = audit_log.record(entry).await {
        tracing::error!(
            action = action,
            user_id = %user_id,
            error = %e,
            "Failed to write audit record"
        );
    }
}

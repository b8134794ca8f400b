use async_trait::async_trait;

use crate::domain::audit::audit_log::{AuditLog, NewAuditLog};

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn record(&self, entry: &NewAuditLog) -> anyhow::Result<()>;
    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<AuditLog>>;
}

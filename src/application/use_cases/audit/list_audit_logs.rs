use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::ServiceResult;
use crate::application::ports::audit_log_repository::AuditLogRepository;
use crate::domain::audit::audit_log::AuditLog;

pub struct ListAuditLogs<'a, A: AuditLogRepository + ?Sized> {
    pub audit: &'a A,
}

impl<'a, A: AuditLogRepository + ?Sized> ListAuditLogs<'a, A> {
    pub async fn execute(&self, actor: &Actor, limit: i64) -> ServiceResult<Vec<AuditLog>> {
        access::require(actor, Resource::AuditLog, Action::Read)?;
        Ok(self.audit.list_recent(limit.clamp(1, 500)).await?)
    }
}

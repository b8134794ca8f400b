use serde_json::json;
use uuid::Uuid;

use crate::application::access::{self, Action, Actor, Resource};
use crate::application::dto::profiles::ChangeDecisionDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::audit_log_repository::AuditLogRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::pending_change_repository::PendingChangeRepository;
use crate::application::services::notify::notify_user;
use crate::application::use_cases::approvals::load_pending;
use crate::domain::audit::audit_log::{AuditAction, AuditSubject, NewAuditLog};
use crate::domain::changes::pending_change::ChangeStatus;
use crate::domain::notifications::notification::{NewNotification, NotificationKind};

pub struct RejectChange<'a, C, A, N>
where
    C: PendingChangeRepository + ?Sized,
    A: AuditLogRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub changes: &'a C,
    pub audit: &'a A,
    pub notifications: &'a N,
}

impl<'a, C, A, N> RejectChange<'a, C, A, N>
where
    C: PendingChangeRepository + ?Sized,
    A: AuditLogRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    /// Closes the change; the live entity is not touched.
    pub async fn execute(
        &self,
        actor: &Actor,
        change_id: Uuid,
        note: Option<String>,
    ) -> ServiceResult<ChangeDecisionDto> {
        let (admin_id, _) = access::require_user(actor, Resource::PendingChange, Action::Moderate)?;
        let change = load_pending(self.changes, change_id).await?;

        if !self
            .changes
            .mark_processed(change.id, ChangeStatus::Rejected, admin_id, note.as_deref())
            .await?
        {
            return Err(ServiceError::validation(
                "Change has already been processed",
            ));
        }
        self.audit
            .record(&NewAuditLog {
                actor_id: Some(admin_id),
                action: AuditAction::ChangeRejected,
                subject: AuditSubject::Profile(change.entity.entity_type()),
                entity_id: change.entity.id(),
                details: json!({
                    "changeId": change.id,
                    "changes": change.changes.to_json()?,
                    "note": note,
                }),
            })
            .await?;

        let message = match note.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            Some(reason) => format!(
                "Your changes to {} were not approved: {reason}",
                change.changes.display_name()
            ),
            None => format!(
                "Your changes to {} were not approved.",
                change.changes.display_name()
            ),
        };
        notify_user(
            self.notifications,
            change.submitted_by,
            NewNotification {
                kind: NotificationKind::ChangeRejected,
                title: "Profile changes rejected".into(),
                message,
                link: None,
            },
        )
        .await;
        tracing::info!(change_id = %change.id, entity_id = %change.entity.id(), "change_rejected");

        Ok(ChangeDecisionDto {
            change_id: change.id,
            status: ChangeStatus::Rejected,
            entity: change.entity,
            slug: None,
        })
    }
}

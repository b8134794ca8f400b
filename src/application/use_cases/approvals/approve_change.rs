use serde_json::json;
use uuid::Uuid;

use crate::application::access::{self, Action, Actor, Resource};
use crate::application::dto::profiles::ChangeDecisionDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::audit_log_repository::AuditLogRepository;
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::pending_change_repository::PendingChangeRepository;
use crate::application::services::notify::notify_user;
use crate::application::services::slugs::allocate_slug;
use crate::application::use_cases::approvals::load_pending;
use crate::domain::audit::audit_log::{AuditAction, AuditSubject, NewAuditLog};
use crate::domain::changes::pending_change::{
    ChangeStatus, FirmChange, LawyerChange, ProposedChanges,
};
use crate::domain::notifications::notification::{NewNotification, NotificationKind};
use crate::domain::profiles::entity::{ProfileRef, ProfileStatus};

pub struct ApproveChange<'a, C, L, F, A, N>
where
    C: PendingChangeRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
    A: AuditLogRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub changes: &'a C,
    pub lawyers: &'a L,
    pub firms: &'a F,
    pub audit: &'a A,
    pub notifications: &'a N,
}

impl<'a, C, L, F, A, N> ApproveChange<'a, C, L, F, A, N>
where
    C: PendingChangeRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
    A: AuditLogRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        change_id: Uuid,
        note: Option<String>,
    ) -> ServiceResult<ChangeDecisionDto> {
        let (admin_id, _) = access::require_user(actor, Resource::PendingChange, Action::Moderate)?;
        let change = load_pending(self.changes, change_id).await?;

        let exists = match (&change.entity, &change.changes) {
            (ProfileRef::Lawyer(id), ProposedChanges::Lawyer(_)) => {
                self.lawyers.get(*id).await?.is_some()
            }
            (ProfileRef::Firm(id), ProposedChanges::Firm(_)) => {
                self.firms.get(*id).await?.is_some()
            }
            _ => return Err(payload_mismatch(&change.entity, &change.changes, change.id)),
        };
        if !exists {
            return Err(ServiceError::NotFound(match change.entity {
                ProfileRef::Lawyer(_) => "Lawyer",
                ProfileRef::Firm(_) => "Firm",
            }));
        }

        // Claimed before any write, so a concurrent decision never applies it twice.
        let claimed = self
            .changes
            .mark_processed(change.id, ChangeStatus::Approved, admin_id, note.as_deref())
            .await?;
        if !claimed {
            tracing::warn!(change_id = %change.id, "change_processed_concurrently");
            return Err(ServiceError::validation("Change has already been processed"));
        }

        let slug = match (&change.entity, &change.changes) {
            (ProfileRef::Lawyer(id), ProposedChanges::Lawyer(payload)) => {
                self.apply_lawyer(*id, payload).await?
            }
            (ProfileRef::Firm(id), ProposedChanges::Firm(payload)) => {
                self.apply_firm(*id, payload).await?
            }
            _ => return Err(payload_mismatch(&change.entity, &change.changes, change.id)),
        };

        self.audit
            .record(&NewAuditLog {
                actor_id: Some(admin_id),
                action: AuditAction::ChangeApproved,
                subject: AuditSubject::Profile(change.entity.entity_type()),
                entity_id: change.entity.id(),
                details: json!({
                    "changeId": change.id,
                    "slug": slug,
                    "changes": change.changes.to_json()?,
                    "note": note,
                }),
            })
            .await?;

        let path = match change.entity {
            ProfileRef::Lawyer(_) => format!("/lawyers/{slug}"),
            ProfileRef::Firm(_) => format!("/firms/{slug}"),
        };
        notify_user(
            self.notifications,
            change.submitted_by,
            NewNotification {
                kind: NotificationKind::ChangeApproved,
                title: "Profile changes approved".into(),
                message: format!(
                    "Your changes to {} are now live.",
                    change.changes.display_name()
                ),
                link: Some(path),
            },
        )
        .await;
        tracing::info!(change_id = %change.id, entity_id = %change.entity.id(), slug = %slug, "change_approved");

        Ok(ChangeDecisionDto {
            change_id: change.id,
            status: ChangeStatus::Approved,
            entity: change.entity,
            slug: Some(slug),
        })
    }

    async fn apply_lawyer(&self, id: Uuid, payload: &LawyerChange) -> ServiceResult<String> {
        // Another lawyer may have taken the slug since the submission.
        let slug = allocate_slug(self.lawyers, &payload.slug, Some(id)).await?;
        if slug != payload.slug {
            tracing::info!(lawyer_id = %id, proposed = %payload.slug, slug = %slug, "slug_reallocated");
        }
        if !self
            .lawyers
            .update_profile(id, &slug, &payload.details, ProfileStatus::Published)
            .await?
        {
            return Err(ServiceError::NotFound("Lawyer"));
        }
        let delta = self
            .lawyers
            .stored_collections(id)
            .await?
            .diff(&payload.collections);
        if !delta.is_empty() {
            self.lawyers.apply_collections(id, &delta).await?;
        }
        Ok(slug)
    }

    async fn apply_firm(&self, id: Uuid, payload: &FirmChange) -> ServiceResult<String> {
        let slug = allocate_slug(self.firms, &payload.slug, Some(id)).await?;
        if slug != payload.slug {
            tracing::info!(firm_id = %id, proposed = %payload.slug, slug = %slug, "slug_reallocated");
        }
        if !self
            .firms
            .update_profile(id, &slug, &payload.details, ProfileStatus::Published)
            .await?
        {
            return Err(ServiceError::NotFound("Firm"));
        }
        let delta = self
            .firms
            .stored_collections(id)
            .await?
            .diff(&payload.collections);
        if !delta.is_empty() {
            self.firms.apply_collections(id, &delta).await?;
        }
        Ok(slug)
    }
}

fn payload_mismatch(entity: &ProfileRef, changes: &ProposedChanges, id: Uuid) -> ServiceError {
    anyhow::anyhow!(
        "change {} targets {} but carries a {} payload",
        id,
        entity.entity_type().as_str(),
        changes.entity_type().as_str()
    )
    .into()
}

use crate::application::access::{self, Action, Actor, Resource};
use crate::application::dto::profiles::{SubmissionOutcomeDto, SubmitMode};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::audit_log_repository::AuditLogRepository;
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::pending_change_repository::{
    NewPendingChange, PendingChangeRepository,
};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::notify::notify_admins;
use crate::application::services::slugs::allocate_slug;
use crate::domain::audit::audit_log::{AuditAction, AuditSubject, NewAuditLog};
use crate::domain::changes::pending_change::{FirmChange, ProposedChanges};
use crate::domain::notifications::notification::{NewNotification, NotificationKind};
use crate::domain::profiles::entity::{EntityType, ProfileRef, ProfileStatus};
use crate::domain::profiles::firm::{FirmCollections, FirmDetails, StoredFirmCollections};
use crate::domain::profiles::slug::slugify;

#[derive(Debug, Clone)]
pub struct FirmSubmission {
    pub details: FirmDetails,
    pub collections: FirmCollections,
}

pub struct SubmitFirmProfile<'a, F, C, A, U, N>
where
    F: FirmRepository + ?Sized,
    C: PendingChangeRepository + ?Sized,
    A: AuditLogRepository + ?Sized,
    U: UserRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub firms: &'a F,
    pub changes: &'a C,
    pub audit: &'a A,
    pub users: &'a U,
    pub notifications: &'a N,
}

impl<'a, F, C, A, U, N> SubmitFirmProfile<'a, F, C, A, U, N>
where
    F: FirmRepository + ?Sized,
    C: PendingChangeRepository + ?Sized,
    A: AuditLogRepository + ?Sized,
    U: UserRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        mode: SubmitMode,
        submission: FirmSubmission,
    ) -> ServiceResult<SubmissionOutcomeDto> {
        let action = match mode {
            SubmitMode::Create => Action::Create,
            SubmitMode::Update => Action::Update,
        };
        let (user_id, _) = access::require_user(actor, Resource::FirmProfile, action)?;
        submission.details.validate()?;
        let FirmSubmission {
            details,
            collections,
        } = submission;

        let existing = self.firms.find_by_owner(user_id).await?;
        // (firm id, proposed slug, slug the firm carries now, stored status, audit action)
        let (firm_id, proposed_slug, live_slug, status, audit_action) = match (mode, existing) {
            (SubmitMode::Create, Some(_)) => {
                return Err(ServiceError::validation(
                    "A firm profile already exists for this account",
                ));
            }
            (SubmitMode::Update, None) => return Err(ServiceError::NotFound("Firm profile")),
            (SubmitMode::Create, None) => {
                let slug = allocate_slug(self.firms, &details.name, None).await?;
                let firm = self.firms.insert_draft(user_id, &slug, &details).await?;
                let delta = StoredFirmCollections::default().diff(&collections);
                self.firms.apply_collections(firm.id, &delta).await?;
                tracing::info!(firm_id = %firm.id, slug = %slug, "firm_profile_created");
                (
                    firm.id,
                    slug.clone(),
                    slug,
                    firm.status,
                    AuditAction::ProfileCreated,
                )
            }
            (SubmitMode::Update, Some(firm)) => {
                let slug = if slugify(&details.name) == slugify(&firm.details.name) {
                    firm.slug.clone()
                } else {
                    allocate_slug(self.firms, &details.name, Some(firm.id)).await?
                };
                let live_slug = if firm.status == ProfileStatus::Draft {
                    if !self
                        .firms
                        .update_profile(firm.id, &slug, &details, ProfileStatus::Draft)
                        .await?
                    {
                        return Err(ServiceError::NotFound("Firm profile"));
                    }
                    let delta = self
                        .firms
                        .stored_collections(firm.id)
                        .await?
                        .diff(&collections);
                    if !delta.is_empty() {
                        self.firms.apply_collections(firm.id, &delta).await?;
                    }
                    slug.clone()
                } else {
                    // Published firms keep their live slug until approval.
                    firm.slug.clone()
                };
                (
                    firm.id,
                    slug,
                    live_slug,
                    firm.status,
                    AuditAction::ProfileUpdated,
                )
            }
        };

        let changes = ProposedChanges::Firm(FirmChange {
            slug: proposed_slug,
            details,
            collections,
        });
        let name = changes.display_name();
        self.audit
            .record(&NewAuditLog {
                actor_id: Some(user_id),
                action: audit_action,
                subject: AuditSubject::Profile(EntityType::Firm),
                entity_id: firm_id,
                details: changes.to_json()?,
            })
            .await?;
        let change = self
            .changes
            .upsert_pending(&NewPendingChange {
                entity: ProfileRef::Firm(firm_id),
                submitted_by: user_id,
                changes,
            })
            .await?;
        notify_admins(
            self.users,
            self.notifications,
            NewNotification {
                kind: NotificationKind::ProfileSubmitted,
                title: "Firm profile awaiting review".into(),
                message: format!("{name} submitted profile changes for approval."),
                link: Some(format!("/admin/approvals/{}", change.id)),
            },
        )
        .await;
        tracing::info!(firm_id = %firm_id, change_id = %change.id, "firm_profile_change_submitted");

        Ok(SubmissionOutcomeDto {
            entity: ProfileRef::Firm(firm_id),
            slug: live_slug,
            status: status.effective(true),
            change_id: change.id,
            created: matches!(mode, SubmitMode::Create),
        })
    }
}

use uuid::Uuid;

use crate::application::access::{self, Action, Actor, Resource};
use crate::application::dto::profiles::{SubmissionOutcomeDto, SubmitMode};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::audit_log_repository::AuditLogRepository;
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::pending_change_repository::{
    NewPendingChange, PendingChangeRepository,
};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::notify::notify_admins;
use crate::application::services::slugs::allocate_slug;
use crate::domain::audit::audit_log::{AuditAction, AuditSubject, NewAuditLog};
use crate::domain::changes::pending_change::{LawyerChange, ProposedChanges};
use crate::domain::notifications::notification::{NewNotification, NotificationKind};
use crate::domain::profiles::entity::{EntityType, ProfileRef, ProfileStatus};
use crate::domain::profiles::lawyer::{
    Lawyer, LawyerCollections, LawyerDetails, StoredLawyerCollections,
};
use crate::domain::profiles::slug::slugify;

#[derive(Debug, Clone)]
pub struct LawyerSubmission {
    pub details: LawyerDetails,
    pub collections: LawyerCollections,
}

pub struct SubmitLawyerProfile<'a, L, F, C, A, U, N>
where
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
    C: PendingChangeRepository + ?Sized,
    A: AuditLogRepository + ?Sized,
    U: UserRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub lawyers: &'a L,
    pub firms: &'a F,
    pub changes: &'a C,
    pub audit: &'a A,
    pub users: &'a U,
    pub notifications: &'a N,
}

impl<'a, L, F, C, A, U, N> SubmitLawyerProfile<'a, L, F, C, A, U, N>
where
    L: LawyerRepository + ?Sized,
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
        submission: LawyerSubmission,
    ) -> ServiceResult<SubmissionOutcomeDto> {
        let action = match mode {
            SubmitMode::Create => Action::Create,
            SubmitMode::Update => Action::Update,
        };
        let (user_id, _) = access::require_user(actor, Resource::LawyerProfile, action)?;
        submission.details.validate()?;

        let existing = self.lawyers.find_by_owner(user_id).await?;
        let current_firm = existing.as_ref().and_then(|l| l.details.firm_id);
        if let Some(firm_id) = submission.details.firm_id.filter(|id| Some(*id) != current_firm) {
            self.check_firm(user_id, firm_id).await?;
        }
        match (mode, existing) {
            (SubmitMode::Create, Some(_)) => Err(ServiceError::validation(
                "A lawyer profile already exists for this account",
            )),
            (SubmitMode::Update, None) => Err(ServiceError::NotFound("Lawyer profile")),
            (SubmitMode::Create, None) => self.create(user_id, submission).await,
            (SubmitMode::Update, Some(lawyer)) => self.update(user_id, lawyer, submission).await,
        }
    }

    async fn create(
        &self,
        user_id: Uuid,
        submission: LawyerSubmission,
    ) -> ServiceResult<SubmissionOutcomeDto> {
        let LawyerSubmission {
            details,
            collections,
        } = submission;
        let slug = allocate_slug(self.lawyers, &details.full_name(), None).await?;
        let lawyer = self.lawyers.insert_draft(user_id, &slug, &details).await?;
        let delta = StoredLawyerCollections::default().diff(&collections);
        self.lawyers.apply_collections(lawyer.id, &delta).await?;

        let changes = ProposedChanges::Lawyer(LawyerChange {
            slug: slug.clone(),
            details,
            collections,
        });
        let change_id = self
            .stage(user_id, lawyer.id, AuditAction::ProfileCreated, changes)
            .await?;
        tracing::info!(lawyer_id = %lawyer.id, slug = %slug, "lawyer_profile_created");

        Ok(SubmissionOutcomeDto {
            entity: ProfileRef::Lawyer(lawyer.id),
            slug,
            status: ProfileStatus::Draft.effective(true),
            change_id,
            created: true,
        })
    }

    async fn update(
        &self,
        user_id: Uuid,
        lawyer: Lawyer,
        submission: LawyerSubmission,
    ) -> ServiceResult<SubmissionOutcomeDto> {
        let LawyerSubmission {
            details,
            collections,
        } = submission;
        let slug = if slugify(&details.full_name()) == slugify(&lawyer.details.full_name()) {
            lawyer.slug.clone()
        } else {
            allocate_slug(self.lawyers, &details.full_name(), Some(lawyer.id)).await?
        };

        // A published profile stays live as-is until the change is approved.
        if lawyer.status == ProfileStatus::Draft {
            let updated = self
                .lawyers
                .update_profile(lawyer.id, &slug, &details, ProfileStatus::Draft)
                .await?;
            if !updated {
                return Err(ServiceError::NotFound("Lawyer profile"));
            }
            let stored = self.lawyers.stored_collections(lawyer.id).await?;
            let delta = stored.diff(&collections);
            if !delta.is_empty() {
                self.lawyers.apply_collections(lawyer.id, &delta).await?;
            }
        }

        let changes = ProposedChanges::Lawyer(LawyerChange {
            slug: slug.clone(),
            details,
            collections,
        });
        let change_id = self
            .stage(user_id, lawyer.id, AuditAction::ProfileUpdated, changes)
            .await?;
        tracing::info!(lawyer_id = %lawyer.id, change_id = %change_id, "lawyer_profile_change_submitted");

        Ok(SubmissionOutcomeDto {
            entity: ProfileRef::Lawyer(lawyer.id),
            slug: if lawyer.status == ProfileStatus::Draft {
                slug
            } else {
                lawyer.slug
            },
            status: lawyer.status.effective(true),
            change_id,
            created: false,
        })
    }

    /// A lawyer may join a published firm (the change still needs admin approval)
    /// or a draft firm they own themselves.
    async fn check_firm(&self, user_id: Uuid, firm_id: Uuid) -> ServiceResult<()> {
        let firm = self
            .firms
            .get(firm_id)
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid firmId"))?;
        if !firm.is_published() && firm.owner_id != user_id {
            return Err(ServiceError::validation("Firm is not published"));
        }
        Ok(())
    }

    /// Audit row, pending-change snapshot and admin fan-out shared by create and update.
    async fn stage(
        &self,
        user_id: Uuid,
        lawyer_id: Uuid,
        action: AuditAction,
        changes: ProposedChanges,
    ) -> ServiceResult<Uuid> {
        let name = changes.display_name();
        self.audit
            .record(&NewAuditLog {
                actor_id: Some(user_id),
                action,
                subject: AuditSubject::Profile(EntityType::Lawyer),
                entity_id: lawyer_id,
                details: changes.to_json()?,
            })
            .await?;
        let change = self
            .changes
            .upsert_pending(&NewPendingChange {
                entity: ProfileRef::Lawyer(lawyer_id),
                submitted_by: user_id,
                changes,
            })
            .await?;
        notify_admins(
            self.users,
            self.notifications,
            NewNotification {
                kind: NotificationKind::ProfileSubmitted,
                title: "Lawyer profile awaiting review".into(),
                message: format!("{name} submitted profile changes for approval."),
                link: Some(format!("/admin/approvals/{}", change.id)),
            },
        )
        .await;
        Ok(change.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryStore;
    use crate::domain::changes::pending_change::ChangeStatus;
    use crate::domain::profiles::firm::FirmDetails;
    use crate::domain::users::user::Role;

    fn submit(
        store: &InMemoryStore,
    ) -> SubmitLawyerProfile<
        '_,
        InMemoryStore,
        InMemoryStore,
        InMemoryStore,
        InMemoryStore,
        InMemoryStore,
        InMemoryStore,
    > {
        SubmitLawyerProfile {
            lawyers: store,
            firms: store,
            changes: store,
            audit: store,
            users: store,
            notifications: store,
        }
    }

    fn jane() -> LawyerSubmission {
        LawyerSubmission {
            details: LawyerDetails {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                ..Default::default()
            },
            collections: LawyerCollections {
                specialisations: vec!["Family Law".into()],
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn missing_names_persist_nothing() {
        let store = InMemoryStore::new();
        let lawyer = store.add_user(Role::Lawyer, "Jane");
        let mut input = jane();
        input.details.last_name = "  ".into();

        let err = submit(&store)
            .execute(&lawyer, SubmitMode::Create, input)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("lastName")));
        assert_eq!(store.lawyer_count(), 0);
        assert!(store.change_list().is_empty());
        assert!(store.audit_actions().is_empty());
    }

    #[tokio::test]
    async fn create_stages_draft_and_notifies_admins() {
        let store = InMemoryStore::new();
        let admin = store.add_user(Role::Admin, "Admin");
        let lawyer = store.add_user(Role::Lawyer, "Jane");

        let out = submit(&store)
            .execute(&lawyer, SubmitMode::Create, jane())
            .await
            .unwrap();

        assert!(out.created);
        assert_eq!(out.slug, "jane-doe");
        assert_eq!(out.status, ProfileStatus::Pending);
        let stored = store.lawyer(out.entity.id()).unwrap();
        assert_eq!(stored.status, ProfileStatus::Draft);
        assert_eq!(stored.collections.specialisations, vec!["Family Law"]);
        let changes = store.change_list();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, ChangeStatus::Pending);
        assert_eq!(store.audit_actions(), vec!["PROFILE_CREATED"]);
        let admin_id = admin.user_id().unwrap();
        assert_eq!(store.notifications_for(admin_id).len(), 1);
    }

    #[tokio::test]
    async fn second_create_is_rejected() {
        let store = InMemoryStore::new();
        let lawyer = store.add_user(Role::Lawyer, "Jane");
        submit(&store)
            .execute(&lawyer, SubmitMode::Create, jane())
            .await
            .unwrap();
        let err = submit(&store)
            .execute(&lawyer, SubmitMode::Create, jane())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(store.lawyer_count(), 1);
    }

    #[tokio::test]
    async fn wrong_role_is_unauthorized() {
        let store = InMemoryStore::new();
        let client = store.add_user(Role::Client, "Carl");
        let err = submit(&store)
            .execute(&client, SubmitMode::Create, jane())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[tokio::test]
    async fn draft_update_writes_through_and_replaces_pending_change() {
        let store = InMemoryStore::new();
        let lawyer = store.add_user(Role::Lawyer, "Jane");
        let first = submit(&store)
            .execute(&lawyer, SubmitMode::Create, jane())
            .await
            .unwrap();

        let mut edit = jane();
        edit.details.last_name = "Smith".into();
        edit.collections.specialisations = vec!["Tax".into()];
        let second = submit(&store)
            .execute(&lawyer, SubmitMode::Update, edit)
            .await
            .unwrap();

        assert_eq!(second.slug, "jane-smith");
        assert_eq!(second.change_id, first.change_id);
        let stored = store.lawyer(first.entity.id()).unwrap();
        assert_eq!(stored.details.last_name, "Smith");
        assert_eq!(stored.collections.specialisations, vec!["Tax"]);
        assert_eq!(store.change_list().len(), 1);
    }

    #[tokio::test]
    async fn published_update_only_stages_the_change() {
        let store = InMemoryStore::new();
        let lawyer = store.add_user(Role::Lawyer, "Jane");
        let id = store.seed_lawyer(
            lawyer.user_id().unwrap(),
            "jane-doe",
            jane().details,
            LawyerCollections::default(),
            ProfileStatus::Published,
        );

        let mut edit = jane();
        edit.details.bio = Some("Twenty years in family courts".into());
        let out = submit(&store)
            .execute(&lawyer, SubmitMode::Update, edit)
            .await
            .unwrap();

        assert_eq!(out.status, ProfileStatus::Published);
        let live = store.lawyer(id).unwrap();
        assert_eq!(live.details.bio, None);
        assert!(live.collections.specialisations.is_empty());
        assert_eq!(store.change_list().len(), 1);
        assert_eq!(store.audit_actions(), vec!["PROFILE_UPDATED"]);
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_submission() {
        let store = InMemoryStore::failing_notifications();
        store.add_user(Role::Admin, "Admin");
        let lawyer = store.add_user(Role::Lawyer, "Jane");
        let out = submit(&store)
            .execute(&lawyer, SubmitMode::Create, jane())
            .await;
        assert!(out.is_ok());
    }

    #[tokio::test]
    async fn unknown_firm_is_a_validation_error() {
        let store = InMemoryStore::new();
        let lawyer = store.add_user(Role::Lawyer, "Jane");
        let mut input = jane();
        input.details.firm_id = Some(Uuid::new_v4());
        let err = submit(&store)
            .execute(&lawyer, SubmitMode::Create, input)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "Invalid firmId"));
        assert_eq!(store.lawyer_count(), 0);
        assert!(store.change_list().is_empty());
    }

    #[tokio::test]
    async fn joining_a_firm_needs_it_published_or_owned() {
        let store = InMemoryStore::new();
        let olga = store.add_user(Role::FirmOwner, "Olga");
        let draft_firm = store.seed_firm(
            olga.user_id().unwrap(),
            "doe-partners",
            FirmDetails {
                name: "Doe & Partners".into(),
                ..Default::default()
            },
            ProfileStatus::Draft,
        );
        let lawyer = store.add_user(Role::Lawyer, "Jane");
        let mut input = jane();
        input.details.firm_id = Some(draft_firm);
        let err = submit(&store)
            .execute(&lawyer, SubmitMode::Create, input.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "Firm is not published"));

        let owner_lawyer = store.add_user(Role::LawyerFirmOwner, "Lena");
        let own_firm = store.seed_firm(
            owner_lawyer.user_id().unwrap(),
            "lena-law",
            FirmDetails {
                name: "Lena Law".into(),
                ..Default::default()
            },
            ProfileStatus::Draft,
        );
        input.details.firm_id = Some(own_firm);
        let out = submit(&store)
            .execute(&owner_lawyer, SubmitMode::Create, input)
            .await
            .unwrap();
        let stored = store.lawyer(out.entity.id()).unwrap();
        assert_eq!(stored.details.firm_id, Some(own_firm));
    }
}

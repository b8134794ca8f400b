use serde_json::json;
use uuid::Uuid;

use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::audit_log_repository::AuditLogRepository;
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::review_repository::ReviewRepository;
use crate::application::services::notify::notify_user;
use crate::application::services::profiles::resolve_published;
use crate::domain::audit::audit_log::{AuditAction, AuditSubject, NewAuditLog};
use crate::domain::notifications::notification::{NewNotification, NotificationKind};
use crate::domain::reviews::review::{ModerationAction, Review, ReviewStatus};

pub struct ModerateReview<'a, R, L, F, A, N>
where
    R: ReviewRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
    A: AuditLogRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub reviews: &'a R,
    pub lawyers: &'a L,
    pub firms: &'a F,
    pub audit: &'a A,
    pub notifications: &'a N,
}

impl<'a, R, L, F, A, N> ModerateReview<'a, R, L, F, A, N>
where
    R: ReviewRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
    A: AuditLogRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        review_id: Uuid,
        action: ModerationAction,
        note: Option<String>,
    ) -> ServiceResult<Review> {
        let (admin_id, _) = access::require_user(actor, Resource::Review, Action::Moderate)?;
        let review = self
            .reviews
            .get(review_id)
            .await?
            .ok_or(ServiceError::NotFound("Review"))?;
        let next = action.target_status();
        if !review.status.can_transition_to(next) {
            return Err(ServiceError::validation(format!(
                "Cannot move a {} review to {}",
                review.status.as_str(),
                next.as_str()
            )));
        }

        if !self
            .reviews
            .update_status(review.id, next, note.as_deref())
            .await?
        {
            return Err(ServiceError::NotFound("Review"));
        }
        self.audit
            .record(&NewAuditLog {
                actor_id: Some(admin_id),
                action: AuditAction::ReviewModerated,
                subject: AuditSubject::Review,
                entity_id: review.id,
                details: json!({
                    "from": review.status.as_str(),
                    "to": next.as_str(),
                    "note": note,
                    "targetType": review.target.entity_type().as_str(),
                    "targetId": review.target.id(),
                }),
            })
            .await?;

        if next == ReviewStatus::Approved {
            match resolve_published(self.lawyers, self.firms, review.target).await {
                Ok(Some(target)) => {
                    notify_user(
                        self.notifications,
                        target.owner_id,
                        NewNotification {
                            kind: NotificationKind::ReviewPublished,
                            title: "New review published".into(),
                            message: format!("A review of {} is now visible.", target.name),
                            link: Some(target.public_path()),
                        },
                    )
                    .await;
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(review_id = %review.id, error = ?err, "review_target_lookup_failed")
                }
            }
        }
        tracing::info!(review_id = %review.id, from = review.status.as_str(), to = next.as_str(), "review_moderated");

        self.reviews
            .get(review.id)
            .await?
            .ok_or(ServiceError::NotFound("Review"))
    }
}

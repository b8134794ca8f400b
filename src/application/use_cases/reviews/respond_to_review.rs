use serde_json::json;
use uuid::Uuid;

use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::audit_log_repository::AuditLogRepository;
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::review_repository::ReviewRepository;
use crate::application::services::profiles::owned_profiles;
use crate::domain::audit::audit_log::{AuditAction, AuditSubject, NewAuditLog};
use crate::domain::reviews::review::{Review, ReviewStatus};
use crate::domain::validation::require_fields;

pub struct RespondToReview<'a, R, L, F, A>
where
    R: ReviewRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
    A: AuditLogRepository + ?Sized,
{
    pub reviews: &'a R,
    pub lawyers: &'a L,
    pub firms: &'a F,
    pub audit: &'a A,
}

impl<'a, R, L, F, A> RespondToReview<'a, R, L, F, A>
where
    R: ReviewRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
    A: AuditLogRepository + ?Sized,
{
    /// One public reply per review, by the owner of the reviewed profile.
    pub async fn execute(
        &self,
        actor: &Actor,
        review_id: Uuid,
        content: &str,
    ) -> ServiceResult<Review> {
        let (user_id, _) = access::require_user(actor, Resource::Review, Action::Respond)?;
        require_fields(&[("content", content)])?;
        let review = self
            .reviews
            .get(review_id)
            .await?
            .ok_or(ServiceError::NotFound("Review"))?;

        let owned = owned_profiles(self.lawyers, self.firms, user_id).await?;
        if !owned.contains(&review.target) {
            return Err(ServiceError::Unauthorized);
        }
        if review.status != ReviewStatus::Approved {
            return Err(ServiceError::validation(
                "Only approved reviews can be answered",
            ));
        }
        if review.response.is_some()
            || !self.reviews.set_response(review.id, content.trim()).await?
        {
            return Err(ServiceError::validation(
                "This review already has a response",
            ));
        }

        self.audit
            .record(&NewAuditLog {
                actor_id: Some(user_id),
                action: AuditAction::ReviewResponded,
                subject: AuditSubject::Review,
                entity_id: review.id,
                details: json!({ "content": content.trim() }),
            })
            .await?;
        tracing::info!(review_id = %review.id, "review_response_added");

        self.reviews
            .get(review.id)
            .await?
            .ok_or(ServiceError::NotFound("Review"))
    }
}

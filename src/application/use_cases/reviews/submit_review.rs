use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::review_repository::{NewReview, ReviewRepository};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::notify::notify_admins;
use crate::application::services::profiles::resolve_published;
use crate::domain::notifications::notification::{NewNotification, NotificationKind};
use crate::domain::profiles::entity::ProfileRef;
use crate::domain::reviews::review::{Ratings, Review};
use crate::domain::validation::require_fields;

#[derive(Debug, Clone)]
pub struct ReviewSubmission {
    pub target: ProfileRef,
    pub title: String,
    pub content: String,
    pub ratings: Ratings,
}

pub struct SubmitReview<'a, R, L, F, U, N>
where
    R: ReviewRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
    U: UserRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub reviews: &'a R,
    pub lawyers: &'a L,
    pub firms: &'a F,
    pub users: &'a U,
    pub notifications: &'a N,
}

impl<'a, R, L, F, U, N> SubmitReview<'a, R, L, F, U, N>
where
    R: ReviewRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
    U: UserRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Actor, input: ReviewSubmission) -> ServiceResult<Review> {
        let (author_id, _) = access::require_user(actor, Resource::Review, Action::Create)?;
        require_fields(&[
            ("title", input.title.as_str()),
            ("content", input.content.as_str()),
        ])?;
        input.ratings.validate()?;

        let target = resolve_published(self.lawyers, self.firms, input.target)
            .await?
            .ok_or(ServiceError::NotFound("Profile"))?;
        if self
            .reviews
            .exists_for_author(input.target, author_id)
            .await?
        {
            return Err(ServiceError::validation(
                "You have already reviewed this profile",
            ));
        }
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(ServiceError::Unauthorized)?;

        let review = self
            .reviews
            .create(&NewReview {
                target: input.target,
                author_id,
                author_name: author.name,
                title: input.title.trim().to_string(),
                content: input.content.trim().to_string(),
                ratings: input.ratings,
                overall_rating: input.ratings.overall(),
            })
            .await?;

        notify_admins(
            self.users,
            self.notifications,
            NewNotification {
                kind: NotificationKind::ReviewSubmitted,
                title: "New review awaiting moderation".into(),
                message: format!("A review of {} was submitted.", target.name),
                link: Some(format!("/admin/reviews/{}", review.id)),
            },
        )
        .await;
        tracing::info!(review_id = %review.id, target_id = %input.target.id(), overall = review.overall_rating, "review_submitted");
        Ok(review)
    }
}

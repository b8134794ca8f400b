use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::ServiceResult;
use crate::application::ports::review_repository::ReviewRepository;
use crate::domain::reviews::review::{Review, ReviewStatus};

pub struct ListModerationQueue<'a, R: ReviewRepository + ?Sized> {
    pub reviews: &'a R,
}

impl<'a, R: ReviewRepository + ?Sized> ListModerationQueue<'a, R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        status: Option<ReviewStatus>,
        limit: i64,
    ) -> ServiceResult<Vec<Review>> {
        access::require(actor, Resource::Review, Action::Moderate)?;
        Ok(self
            .reviews
            .list_by_status(status, limit.clamp(1, 500))
            .await?)
    }
}

use crate::application::error::ServiceResult;
use crate::application::ports::review_repository::ReviewRepository;
use crate::domain::profiles::entity::ProfileRef;
use crate::domain::reviews::review::{Review, ReviewStatus};

/// Public listing: approved reviews only.
pub struct ListReviews<'a, R: ReviewRepository + ?Sized> {
    pub reviews: &'a R,
}

impl<'a, R: ReviewRepository + ?Sized> ListReviews<'a, R> {
    pub async fn execute(&self, target: ProfileRef) -> ServiceResult<Vec<Review>> {
        Ok(self
            .reviews
            .list_for_target(target, Some(ReviewStatus::Approved))
            .await?)
    }
}

use crate::application::dto::profiles::PublicLawyerDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::review_repository::ReviewRepository;
use crate::domain::profiles::entity::ProfileRef;

pub struct GetPublicLawyer<'a, L, R>
where
    L: LawyerRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    pub lawyers: &'a L,
    pub reviews: &'a R,
}

impl<'a, L, R> GetPublicLawyer<'a, L, R>
where
    L: LawyerRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    pub async fn execute(&self, slug: &str) -> ServiceResult<PublicLawyerDto> {
        let lawyer = self
            .lawyers
            .find_by_slug(slug)
            .await?
            .filter(|l| l.is_published())
            .ok_or(ServiceError::NotFound("Lawyer"))?;
        let rating = self
            .reviews
            .rating_summary(ProfileRef::Lawyer(lawyer.id))
            .await?;
        Ok(PublicLawyerDto { lawyer, rating })
    }
}

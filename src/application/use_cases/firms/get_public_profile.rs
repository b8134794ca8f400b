use crate::application::dto::profiles::PublicFirmDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::review_repository::ReviewRepository;
use crate::domain::profiles::entity::ProfileRef;

pub struct GetPublicFirm<'a, F, L, R>
where
    F: FirmRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    pub firms: &'a F,
    pub lawyers: &'a L,
    pub reviews: &'a R,
}

impl<'a, F, L, R> GetPublicFirm<'a, F, L, R>
where
    F: FirmRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    pub async fn execute(&self, slug: &str) -> ServiceResult<PublicFirmDto> {
        let firm = self
            .firms
            .find_by_slug(slug)
            .await?
            .filter(|f| f.is_published())
            .ok_or(ServiceError::NotFound("Firm"))?;
        let rating = self.reviews.rating_summary(ProfileRef::Firm(firm.id)).await?;
        let lawyers = self.lawyers.list_published_for_firm(firm.id).await?;
        Ok(PublicFirmDto {
            firm,
            rating,
            lawyers,
        })
    }
}

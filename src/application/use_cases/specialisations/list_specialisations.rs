use crate::application::error::ServiceResult;
use crate::application::ports::specialisation_repository::SpecialisationRepository;
use crate::domain::profiles::specialisation::Specialisation;

pub struct ListSpecialisations<'a, S: SpecialisationRepository + ?Sized> {
    pub repo: &'a S,
}

impl<'a, S: SpecialisationRepository + ?Sized> ListSpecialisations<'a, S> {
    pub async fn execute(&self) -> ServiceResult<Vec<Specialisation>> {
        Ok(self.repo.list_all().await?)
    }
}

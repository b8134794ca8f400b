use async_trait::async_trait;

use crate::domain::profiles::specialisation::Specialisation;

#[async_trait]
pub trait SpecialisationRepository: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<Specialisation>>;
}

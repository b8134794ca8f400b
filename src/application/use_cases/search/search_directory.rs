use crate::application::error::ServiceResult;
use crate::application::ports::search_repository::SearchRepository;
use crate::domain::profiles::entity::EntityType;
use crate::domain::search::directory::{DirectoryHit, SearchCriteria, finalize};

pub struct SearchDirectory<'a, S: SearchRepository + ?Sized> {
    pub search: &'a S,
}

impl<'a, S: SearchRepository + ?Sized> SearchDirectory<'a, S> {
    /// Queries each requested profile type, then merges, sorts and truncates.
    pub async fn execute(&self, criteria: &SearchCriteria) -> ServiceResult<Vec<DirectoryHit>> {
        let mut hits = Vec::new();
        if criteria.wants(EntityType::Lawyer) {
            hits.extend(self.search.search_lawyers(criteria).await?);
        }
        if criteria.wants(EntityType::Firm) {
            hits.extend(self.search.search_firms(criteria).await?);
        }
        let total = hits.len();
        let hits = finalize(hits, criteria);
        tracing::debug!(total, returned = hits.len(), "directory_search");
        Ok(hits)
    }
}

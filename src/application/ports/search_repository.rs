use async_trait::async_trait;

use crate::domain::search::directory::{DirectoryHit, SearchCriteria};

#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// Published lawyers matching the text, location and area filters.
    async fn search_lawyers(&self, criteria: &SearchCriteria) -> anyhow::Result<Vec<DirectoryHit>>;
    async fn search_firms(&self, criteria: &SearchCriteria) -> anyhow::Result<Vec<DirectoryHit>>;
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::slug_lookup::SlugLookup;
use crate::domain::profiles::entity::ProfileStatus;
use crate::domain::profiles::lawyer::{
    Lawyer, LawyerCollectionsDelta, LawyerDetails, StoredLawyerCollections,
};

#[async_trait]
pub trait LawyerRepository: SlugLookup {
    /// Inserts a DRAFT lawyer without collections.
    async fn insert_draft(
        &self,
        user_id: Uuid,
        slug: &str,
        details: &LawyerDetails,
    ) -> anyhow::Result<Lawyer>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Lawyer>>;
    async fn find_by_owner(&self, user_id: Uuid) -> anyhow::Result<Option<Lawyer>>;
    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Lawyer>>;

    // Returns false when the row vanished.
    async fn update_profile(
        &self,
        id: Uuid,
        slug: &str,
        details: &LawyerDetails,
        status: ProfileStatus,
    ) -> anyhow::Result<bool>;

    async fn stored_collections(&self, id: Uuid) -> anyhow::Result<StoredLawyerCollections>;
    async fn apply_collections(
        &self,
        id: Uuid,
        delta: &LawyerCollectionsDelta,
    ) -> anyhow::Result<()>;

    async fn list_published_for_firm(&self, firm_id: Uuid) -> anyhow::Result<Vec<Lawyer>>;
}

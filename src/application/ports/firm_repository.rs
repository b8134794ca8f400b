use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::slug_lookup::SlugLookup;
use crate::domain::profiles::entity::ProfileStatus;
use crate::domain::profiles::firm::{
    FirmCollectionsDelta, FirmDetails, LawFirm, StoredFirmCollections,
};

#[async_trait]
pub trait FirmRepository: SlugLookup {
    async fn insert_draft(
        &self,
        owner_id: Uuid,
        slug: &str,
        details: &FirmDetails,
    ) -> anyhow::Result<LawFirm>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<LawFirm>>;
    async fn find_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Option<LawFirm>>;
    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<LawFirm>>;

    async fn update_profile(
        &self,
        id: Uuid,
        slug: &str,
        details: &FirmDetails,
        status: ProfileStatus,
    ) -> anyhow::Result<bool>;

    async fn stored_collections(&self, id: Uuid) -> anyhow::Result<StoredFirmCollections>;
    async fn apply_collections(&self, id: Uuid, delta: &FirmCollectionsDelta)
    -> anyhow::Result<()>;
}

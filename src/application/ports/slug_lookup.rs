use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait SlugLookup: Send + Sync {
    /// True when another row of the same profile type already holds `slug`.
    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> anyhow::Result<bool>;
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::profiles::entity::ProfileRef;
use crate::domain::reviews::review::{RatingSummary, Ratings, Review, ReviewStatus};

#[derive(Debug, Clone)]
pub struct NewReview {
    pub target: ProfileRef,
    pub author_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub ratings: Ratings,
    pub overall_rating: f64,
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &NewReview) -> anyhow::Result<Review>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Review>>;
    async fn exists_for_author(&self, target: ProfileRef, author_id: Uuid)
    -> anyhow::Result<bool>;
    async fn list_for_target(
        &self,
        target: ProfileRef,
        status: Option<ReviewStatus>,
    ) -> anyhow::Result<Vec<Review>>;
    async fn list_by_status(
        &self,
        status: Option<ReviewStatus>,
        limit: i64,
    ) -> anyhow::Result<Vec<Review>>;
    async fn update_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
        note: Option<&str>,
    ) -> anyhow::Result<bool>;
    /// Sets the owner response once; false when one already exists.
    async fn set_response(&self, id: Uuid, content: &str) -> anyhow::Result<bool>;
    async fn rating_summary(&self, target: ProfileRef) -> anyhow::Result<RatingSummary>;
}

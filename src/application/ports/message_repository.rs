use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::messages::contact_message::{ContactMessage, NewContactMessage};
use crate::domain::profiles::entity::ProfileRef;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: &NewContactMessage) -> anyhow::Result<ContactMessage>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<ContactMessage>>;
    async fn list_for_targets(&self, targets: &[ProfileRef])
    -> anyhow::Result<Vec<ContactMessage>>;
    async fn mark_read(&self, id: Uuid) -> anyhow::Result<bool>;
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::notifications::notification::{NewNotification, Notification};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, notification: &NewNotification)
    -> anyhow::Result<()>;
    async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
        limit: i64,
    ) -> anyhow::Result<Vec<Notification>>;
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<bool>;
    async fn mark_all_read(&self, user_id: Uuid) -> anyhow::Result<u64>;
}

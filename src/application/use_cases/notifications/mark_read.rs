use uuid::Uuid;

use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::notification_repository::NotificationRepository;

pub struct MarkNotificationRead<'a, N: NotificationRepository + ?Sized> {
    pub notifications: &'a N,
}

impl<'a, N: NotificationRepository + ?Sized> MarkNotificationRead<'a, N> {
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<()> {
        let (user_id, _) = access::require_user(actor, Resource::Notification, Action::Update)?;
        if self.notifications.mark_read(id, user_id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound("Notification"))
        }
    }
}

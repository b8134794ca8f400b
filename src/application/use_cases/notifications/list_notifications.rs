use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::ServiceResult;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::domain::notifications::notification::Notification;

pub struct ListNotifications<'a, N: NotificationRepository + ?Sized> {
    pub notifications: &'a N,
}

impl<'a, N: NotificationRepository + ?Sized> ListNotifications<'a, N> {
    pub async fn execute(
        &self,
        actor: &Actor,
        unread_only: bool,
        limit: i64,
    ) -> ServiceResult<Vec<Notification>> {
        let (user_id, _) = access::require_user(actor, Resource::Notification, Action::Read)?;
        Ok(self
            .notifications
            .list_for_user(user_id, unread_only, limit.clamp(1, 200))
            .await?)
    }
}

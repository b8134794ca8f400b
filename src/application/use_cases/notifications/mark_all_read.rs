use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::ServiceResult;
use crate::application::ports::notification_repository::NotificationRepository;

pub struct MarkAllNotificationsRead<'a, N: NotificationRepository + ?Sized> {
    pub notifications: &'a N,
}

impl<'a, N: NotificationRepository + ?Sized> MarkAllNotificationsRead<'a, N> {
    /// Returns how many notifications changed.
    pub async fn execute(&self, actor: &Actor) -> ServiceResult<u64> {
        let (user_id, _) = access::require_user(actor, Resource::Notification, Action::Update)?;
        Ok(self.notifications.mark_all_read(user_id).await?)
    }
}

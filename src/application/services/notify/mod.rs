use uuid::Uuid;

use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::notifications::notification::NewNotification;
use crate::domain::users::user::Role;

// Fan-out never fails the request that triggered it.

pub async fn notify_user<N: NotificationRepository + ?Sized>(
    notifications: &N,
    user_id: Uuid,
    notification: NewNotification,
) {
    if let Err(err) = notifications.create(user_id, &notification).await {
        tracing::warn!(user_id = %user_id, kind = notification.kind.as_str(), error = ?err, "notification_create_failed");
    }
}

pub async fn notify_admins<U, N>(users: &U, notifications: &N, notification: NewNotification)
where
    U: UserRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    let admins = match users.list_by_role(Role::Admin).await {
        Ok(admins) => admins,
        Err(err) => {
            tracing::warn!(error = ?err, "admin_lookup_failed");
            return;
        }
    };
    for admin in admins {
        notify_user(notifications, admin.id, notification.clone()).await;
    }
}

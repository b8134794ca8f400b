use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::notification_repository::NotificationRepository;
use crate::domain::notifications::notification::{NewNotification, Notification};
use crate::infrastructure::db::PgPool;

pub struct SqlxNotificationRepository {
    pub pool: PgPool,
}

impl SqlxNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for SqlxNotificationRepository {
    async fn create(&self, user_id: Uuid, notification: &NewNotification) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO notifications (user_id, kind, title, message, link)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(user_id)
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.link)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
        limit: i64,
    ) -> anyhow::Result<Vec<Notification>> {
        let rows = sqlx::query(
            r#"SELECT id, user_id, kind, title, message, link, read, created_at
               FROM notifications
               WHERE user_id = $1 AND (NOT $2 OR read = false)
               ORDER BY created_at DESC
               LIMIT $3"#,
        )
        .bind(user_id)
        .bind(unread_only)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| Notification {
                id: r.get("id"),
                user_id: r.get("user_id"),
                kind: r.get("kind"),
                title: r.get("title"),
                message: r.get("message"),
                link: r.try_get("link").ok().flatten(),
                read: r.get("read"),
                created_at: r.get("created_at"),
            })
            .collect())
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"UPDATE notifications SET read = true WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"UPDATE notifications SET read = true WHERE user_id = $1 AND read = false"#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}

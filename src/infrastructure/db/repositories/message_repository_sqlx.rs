use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::message_repository::MessageRepository;
use crate::domain::messages::contact_message::{ContactMessage, NewContactMessage};
use crate::domain::profiles::entity::ProfileRef;
use crate::infrastructure::db::PgPool;

const MESSAGE_COLUMNS: &str = "id, lawyer_id, firm_id, sender_name, sender_email, sender_phone, \
    subject, body, read, created_at";

pub struct SqlxMessageRepository {
    pub pool: PgPool,
}

impl SqlxMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_message(r: PgRow) -> anyhow::Result<ContactMessage> {
    let id: Uuid = r.get("id");
    let target = ProfileRef::from_columns(r.get("lawyer_id"), r.get("firm_id"))
        .ok_or_else(|| anyhow::anyhow!("message {id} has no single target"))?;
    Ok(ContactMessage {
        id,
        target,
        sender_name: r.get("sender_name"),
        sender_email: r.get("sender_email"),
        sender_phone: r.try_get("sender_phone").ok().flatten(),
        subject: r.try_get("subject").ok().flatten(),
        body: r.get("body"),
        read: r.get("read"),
        created_at: r.get("created_at"),
    })
}

#[async_trait]
impl MessageRepository for SqlxMessageRepository {
    async fn create(&self, message: &NewContactMessage) -> anyhow::Result<ContactMessage> {
        let sql = format!(
            r#"INSERT INTO contact_messages (lawyer_id, firm_id, sender_name, sender_email,
                   sender_phone, subject, body)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {MESSAGE_COLUMNS}"#
        );
        let row = sqlx::query(&sql)
            .bind(message.target.lawyer_id())
            .bind(message.target.firm_id())
            .bind(message.sender_name.trim())
            .bind(message.sender_email.trim())
            .bind(&message.sender_phone)
            .bind(&message.subject)
            .bind(&message.body)
            .fetch_one(&self.pool)
            .await?;
        map_message(row)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<ContactMessage>> {
        let sql = format!("SELECT {MESSAGE_COLUMNS} FROM contact_messages WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(map_message).transpose()
    }

    async fn list_for_targets(
        &self,
        targets: &[ProfileRef],
    ) -> anyhow::Result<Vec<ContactMessage>> {
        let lawyer_ids: Vec<Uuid> = targets.iter().filter_map(|t| t.lawyer_id()).collect();
        let firm_ids: Vec<Uuid> = targets.iter().filter_map(|t| t.firm_id()).collect();
        if lawyer_ids.is_empty() && firm_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            r#"SELECT {MESSAGE_COLUMNS} FROM contact_messages
               WHERE lawyer_id = ANY($1) OR firm_id = ANY($2)
               ORDER BY created_at DESC"#
        );
        let rows = sqlx::query(&sql)
            .bind(lawyer_ids)
            .bind(firm_ids)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(map_message).collect()
    }

    async fn mark_read(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"UPDATE contact_messages SET read = true WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

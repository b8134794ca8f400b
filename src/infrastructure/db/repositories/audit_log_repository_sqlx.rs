use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::audit_log_repository::AuditLogRepository;
use crate::domain::audit::audit_log::{AuditLog, NewAuditLog};
use crate::infrastructure::db::PgPool;

pub struct SqlxAuditLogRepository {
    pub pool: PgPool,
}

impl SqlxAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for SqlxAuditLogRepository {
    async fn record(&self, entry: &NewAuditLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO audit_logs (actor_id, action, entity_type, entity_id, details)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(entry.actor_id)
        .bind(entry.action.as_str())
        .bind(entry.subject.as_str())
        .bind(entry.entity_id)
        .bind(&entry.details)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<AuditLog>> {
        let rows = sqlx::query(
            r#"SELECT id, actor_id, action, entity_type, entity_id, details, created_at
               FROM audit_logs ORDER BY created_at DESC LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| AuditLog {
                id: r.get("id"),
                actor_id: r.try_get("actor_id").ok().flatten(),
                action: r.get("action"),
                entity_type: r.get("entity_type"),
                entity_id: r.get("entity_id"),
                details: r.get("details"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::pending_change_repository::{
    NewPendingChange, PendingChangeRepository,
};
use crate::domain::changes::pending_change::{ChangeStatus, PendingChange, ProposedChanges};
use crate::domain::profiles::entity::ProfileRef;
use crate::infrastructure::db::PgPool;

const CHANGE_COLUMNS: &str = "id, lawyer_id, firm_id, submitted_by, changes_json, status, \
    reviewed_by, review_note, created_at, reviewed_at";

pub struct SqlxPendingChangeRepository {
    pub pool: PgPool,
}

impl SqlxPendingChangeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_change(r: PgRow) -> anyhow::Result<PendingChange> {
    let id: Uuid = r.get("id");
    let entity = ProfileRef::from_columns(r.get("lawyer_id"), r.get("firm_id"))
        .ok_or_else(|| anyhow::anyhow!("pending change {id} has no single target"))?;
    let status: String = r.get("status");
    Ok(PendingChange {
        id,
        entity,
        submitted_by: r.get("submitted_by"),
        changes: ProposedChanges::from_json(r.get("changes_json"))?,
        status: ChangeStatus::parse(&status)
            .ok_or_else(|| anyhow::anyhow!("unknown change status {status}"))?,
        reviewed_by: r.try_get("reviewed_by").ok().flatten(),
        review_note: r.try_get("review_note").ok().flatten(),
        created_at: r.get("created_at"),
        reviewed_at: r.try_get("reviewed_at").ok().flatten(),
    })
}

#[async_trait]
impl PendingChangeRepository for SqlxPendingChangeRepository {
    async fn upsert_pending(&self, change: &NewPendingChange) -> anyhow::Result<PendingChange> {
        let payload = change.changes.to_json()?;
        let lawyer_id = change.entity.lawyer_id();
        let firm_id = change.entity.firm_id();

        let update = format!(
            r#"UPDATE pending_changes SET changes_json = $3, submitted_by = $4
               WHERE status = 'PENDING'
                 AND lawyer_id IS NOT DISTINCT FROM $1
                 AND firm_id IS NOT DISTINCT FROM $2
               RETURNING {CHANGE_COLUMNS}"#
        );
        let updated = sqlx::query(&update)
            .bind(lawyer_id)
            .bind(firm_id)
            .bind(&payload)
            .bind(change.submitted_by)
            .fetch_optional(&self.pool)
            .await?;
        if let Some(row) = updated {
            return map_change(row);
        }

        let insert = format!(
            r#"INSERT INTO pending_changes (lawyer_id, firm_id, submitted_by, changes_json)
               VALUES ($1, $2, $3, $4)
               RETURNING {CHANGE_COLUMNS}"#
        );
        let row = sqlx::query(&insert)
            .bind(lawyer_id)
            .bind(firm_id)
            .bind(change.submitted_by)
            .bind(&payload)
            .fetch_one(&self.pool)
            .await?;
        map_change(row)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<PendingChange>> {
        let sql = format!("SELECT {CHANGE_COLUMNS} FROM pending_changes WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(map_change).transpose()
    }

    async fn find_pending_for(&self, entity: ProfileRef) -> anyhow::Result<Option<PendingChange>> {
        let sql = format!(
            r#"SELECT {CHANGE_COLUMNS} FROM pending_changes
               WHERE status = 'PENDING'
                 AND lawyer_id IS NOT DISTINCT FROM $1
                 AND firm_id IS NOT DISTINCT FROM $2"#
        );
        let row = sqlx::query(&sql)
            .bind(entity.lawyer_id())
            .bind(entity.firm_id())
            .fetch_optional(&self.pool)
            .await?;
        row.map(map_change).transpose()
    }

    async fn list(
        &self,
        status: Option<ChangeStatus>,
        limit: i64,
    ) -> anyhow::Result<Vec<PendingChange>> {
        let sql = format!(
            r#"SELECT {CHANGE_COLUMNS} FROM pending_changes
               WHERE ($1::text IS NULL OR status = $1)
               ORDER BY created_at DESC
               LIMIT $2"#
        );
        let rows = sqlx::query(&sql)
            .bind(status.map(|s| s.as_str()))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(map_change).collect()
    }

    async fn mark_processed(
        &self,
        id: Uuid,
        status: ChangeStatus,
        reviewer_id: Uuid,
        note: Option<&str>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE pending_changes
               SET status = $2, reviewed_by = $3, review_note = $4, reviewed_at = now()
               WHERE id = $1 AND status = 'PENDING'"#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(reviewer_id)
        .bind(note)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}

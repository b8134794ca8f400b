//! Shared helpers for the profile child tables.

use sqlx::{Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domain::profiles::collections::{CollectionDelta, CourtAppearance, Stored};
use crate::domain::profiles::entity::ProfileStatus;
use crate::infrastructure::db::PgPool;

/// A single-text-column child table such as `lawyer_languages`.
pub(crate) struct TextTable {
    pub table: &'static str,
    pub owner: &'static str,
    pub column: &'static str,
}

pub(crate) fn parse_status(raw: &str) -> anyhow::Result<ProfileStatus> {
    ProfileStatus::parse(raw).ok_or_else(|| anyhow::anyhow!("unknown profile status {raw}"))
}

pub(crate) async fn load_text(
    pool: &PgPool,
    spec: &TextTable,
    owner_id: Uuid,
) -> anyhow::Result<Vec<Stored<String>>> {
    let sql = format!(
        "SELECT id, {col} AS value FROM {table} WHERE {owner} = $1 ORDER BY seq",
        col = spec.column,
        table = spec.table,
        owner = spec.owner,
    );
    let rows = sqlx::query(&sql).bind(owner_id).fetch_all(pool).await?;
    Ok(rows
        .into_iter()
        .map(|r| Stored {
            id: r.get("id"),
            item: r.get("value"),
        })
        .collect())
}

pub(crate) async fn apply_text(
    tx: &mut Transaction<'_, Postgres>,
    spec: &TextTable,
    owner_id: Uuid,
    delta: &CollectionDelta<String>,
) -> anyhow::Result<()> {
    delete_rows(tx, spec.table, spec.owner, owner_id, &delta.delete).await?;
    let update = format!(
        "UPDATE {table} SET {col} = $2 WHERE id = $1",
        table = spec.table,
        col = spec.column,
    );
    for row in &delta.update {
        sqlx::query(&update)
            .bind(row.id)
            .bind(row.item.trim())
            .execute(&mut **tx)
            .await?;
    }
    let insert = format!(
        "INSERT INTO {table} ({owner}, {col}) VALUES ($1, $2)",
        table = spec.table,
        owner = spec.owner,
        col = spec.column,
    );
    for item in &delta.insert {
        sqlx::query(&insert)
            .bind(owner_id)
            .bind(item.trim())
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

pub(crate) async fn load_courts(
    pool: &PgPool,
    table: &'static str,
    owner: &'static str,
    owner_id: Uuid,
) -> anyhow::Result<Vec<Stored<CourtAppearance>>> {
    let sql =
        format!("SELECT id, court, case_count FROM {table} WHERE {owner} = $1 ORDER BY seq");
    let rows = sqlx::query(&sql).bind(owner_id).fetch_all(pool).await?;
    Ok(rows
        .into_iter()
        .map(|r| Stored {
            id: r.get("id"),
            item: CourtAppearance {
                court: r.get("court"),
                case_count: r.get("case_count"),
            },
        })
        .collect())
}

pub(crate) async fn apply_courts(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
    owner: &'static str,
    owner_id: Uuid,
    delta: &CollectionDelta<CourtAppearance>,
) -> anyhow::Result<()> {
    delete_rows(tx, table, owner, owner_id, &delta.delete).await?;
    let update = format!("UPDATE {table} SET court = $2, case_count = $3 WHERE id = $1");
    for row in &delta.update {
        sqlx::query(&update)
            .bind(row.id)
            .bind(row.item.court.trim())
            .bind(row.item.case_count)
            .execute(&mut **tx)
            .await?;
    }
    let insert = format!("INSERT INTO {table} ({owner}, court, case_count) VALUES ($1, $2, $3)");
    for item in &delta.insert {
        sqlx::query(&insert)
            .bind(owner_id)
            .bind(item.court.trim())
            .bind(item.case_count)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

pub(crate) async fn delete_rows(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
    owner: &'static str,
    owner_id: Uuid,
    ids: &[Uuid],
) -> anyhow::Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let sql = format!("DELETE FROM {table} WHERE {owner} = $1 AND id = ANY($2)");
    sqlx::query(&sql)
        .bind(owner_id)
        .bind(ids.to_vec())
        .execute(&mut **tx)
        .await?;
    Ok(())
}

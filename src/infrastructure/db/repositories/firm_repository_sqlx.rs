use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::slug_lookup::SlugLookup;
use crate::domain::profiles::collections::{FirmLocation, Stored};
use crate::domain::profiles::entity::ProfileStatus;
use crate::domain::profiles::firm::{
    FirmCollectionsDelta, FirmDetails, LawFirm, StoredFirmCollections,
};
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::rows::{
    TextTable, apply_courts, apply_text, delete_rows, load_courts, load_text, parse_status,
};

const PRACTICE_AREAS: TextTable = TextTable {
    table: "firm_practice_areas",
    owner: "firm_id",
    column: "name",
};
const LANGUAGES: TextTable = TextTable {
    table: "firm_languages",
    owner: "firm_id",
    column: "language",
};

const FIRM_COLUMNS: &str = "id, owner_id, slug, status, name, email, phone, website, \
    description, founded_year, firm_size, logo_url, created_at, updated_at";

pub struct SqlxFirmRepository {
    pub pool: PgPool,
}

impl SqlxFirmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn hydrate(&self, row: PgRow) -> anyhow::Result<LawFirm> {
        let id: Uuid = row.get("id");
        let status: String = row.get("status");
        let collections = self.stored_collections(id).await?.into_plain();
        Ok(LawFirm {
            id,
            owner_id: row.get("owner_id"),
            slug: row.get("slug"),
            status: parse_status(&status)?,
            details: FirmDetails {
                name: row.get("name"),
                email: row.get("email"),
                phone: row.get("phone"),
                website: row.try_get("website").ok().flatten(),
                description: row.try_get("description").ok().flatten(),
                founded_year: row.try_get("founded_year").ok().flatten(),
                firm_size: row.try_get("firm_size").ok().flatten(),
                logo_url: row.try_get("logo_url").ok().flatten(),
            },
            collections,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    async fn fetch_by_id(&self, column: &'static str, id: Uuid) -> anyhow::Result<Option<LawFirm>> {
        let sql = format!("SELECT {FIRM_COLUMNS} FROM law_firms WHERE {column} = $1");
        match sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await? {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SlugLookup for SqlxFirmRepository {
    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> anyhow::Result<bool> {
        let row = sqlx::query(
            r#"SELECT EXISTS(
                   SELECT 1 FROM law_firms WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)
               ) AS taken"#,
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("taken"))
    }
}

#[async_trait]
impl FirmRepository for SqlxFirmRepository {
    async fn insert_draft(
        &self,
        owner_id: Uuid,
        slug: &str,
        details: &FirmDetails,
    ) -> anyhow::Result<LawFirm> {
        let sql = format!(
            r#"INSERT INTO law_firms (owner_id, slug, status, name, email, phone, website,
                   description, founded_year, firm_size, logo_url)
               VALUES ($1, $2, 'DRAFT', $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING {FIRM_COLUMNS}"#
        );
        let row = sqlx::query(&sql)
            .bind(owner_id)
            .bind(slug)
            .bind(details.name.trim())
            .bind(details.email.trim())
            .bind(details.phone.trim())
            .bind(&details.website)
            .bind(&details.description)
            .bind(details.founded_year)
            .bind(&details.firm_size)
            .bind(&details.logo_url)
            .fetch_one(&self.pool)
            .await?;
        self.hydrate(row).await
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<LawFirm>> {
        self.fetch_by_id("id", id).await
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Option<LawFirm>> {
        self.fetch_by_id("owner_id", owner_id).await
    }

    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<LawFirm>> {
        let sql = format!("SELECT {FIRM_COLUMNS} FROM law_firms WHERE slug = $1");
        match sqlx::query(&sql).bind(slug).fetch_optional(&self.pool).await? {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn update_profile(
        &self,
        id: Uuid,
        slug: &str,
        details: &FirmDetails,
        status: ProfileStatus,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE law_firms SET slug = $2, status = $3, name = $4, email = $5, phone = $6,
                   website = $7, description = $8, founded_year = $9, firm_size = $10,
                   logo_url = $11, updated_at = now()
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(slug)
        .bind(status.as_str())
        .bind(details.name.trim())
        .bind(details.email.trim())
        .bind(details.phone.trim())
        .bind(&details.website)
        .bind(&details.description)
        .bind(details.founded_year)
        .bind(&details.firm_size)
        .bind(&details.logo_url)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn stored_collections(&self, id: Uuid) -> anyhow::Result<StoredFirmCollections> {
        let locations = sqlx::query(
            r#"SELECT id, address, city, state, zip_code, is_primary FROM firm_locations
               WHERE firm_id = $1 ORDER BY seq"#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| Stored {
            id: r.get("id"),
            item: FirmLocation {
                address: r.get("address"),
                city: r.get("city"),
                state: r.get("state"),
                zip_code: r.try_get("zip_code").ok().flatten(),
                is_primary: r.get("is_primary"),
            },
        })
        .collect();
        Ok(StoredFirmCollections {
            locations,
            practice_areas: load_text(&self.pool, &PRACTICE_AREAS, id).await?,
            languages: load_text(&self.pool, &LANGUAGES, id).await?,
            court_appearances: load_courts(&self.pool, "firm_court_appearances", "firm_id", id)
                .await?,
        })
    }

    async fn apply_collections(
        &self,
        id: Uuid,
        delta: &FirmCollectionsDelta,
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        let locations = &delta.locations;
        delete_rows(&mut tx, "firm_locations", "firm_id", id, &locations.delete).await?;
        for row in &locations.update {
            sqlx::query(
                r#"UPDATE firm_locations SET address = $2, city = $3, state = $4, zip_code = $5,
                       is_primary = $6
                   WHERE id = $1"#,
            )
            .bind(row.id)
            .bind(row.item.address.trim())
            .bind(row.item.city.trim())
            .bind(row.item.state.trim())
            .bind(&row.item.zip_code)
            .bind(row.item.is_primary)
            .execute(&mut *tx)
            .await?;
        }
        for item in &locations.insert {
            sqlx::query(
                r#"INSERT INTO firm_locations (firm_id, address, city, state, zip_code, is_primary)
                   VALUES ($1, $2, $3, $4, $5, $6)"#,
            )
            .bind(id)
            .bind(item.address.trim())
            .bind(item.city.trim())
            .bind(item.state.trim())
            .bind(&item.zip_code)
            .bind(item.is_primary)
            .execute(&mut *tx)
            .await?;
        }

        apply_text(&mut tx, &PRACTICE_AREAS, id, &delta.practice_areas).await?;
        apply_text(&mut tx, &LANGUAGES, id, &delta.languages).await?;
        apply_courts(
            &mut tx,
            "firm_court_appearances",
            "firm_id",
            id,
            &delta.court_appearances,
        )
        .await?;
        tx.commit().await?;
        Ok(())
    }
}

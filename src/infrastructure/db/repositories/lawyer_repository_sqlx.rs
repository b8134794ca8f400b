use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::slug_lookup::SlugLookup;
use crate::domain::profiles::collections::{Certification, Stored};
use crate::domain::profiles::entity::ProfileStatus;
use crate::domain::profiles::lawyer::{
    Lawyer, LawyerCollectionsDelta, LawyerDetails, StoredLawyerCollections,
};
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::rows::{
    TextTable, apply_courts, apply_text, delete_rows, load_courts, load_text, parse_status,
};

const SPECIALISATIONS: TextTable = TextTable {
    table: "lawyer_specialisations",
    owner: "lawyer_id",
    column: "name",
};
const LANGUAGES: TextTable = TextTable {
    table: "lawyer_languages",
    owner: "lawyer_id",
    column: "language",
};

const LAWYER_COLUMNS: &str = "id, user_id, slug, status, first_name, last_name, title, bio, \
    email, phone, website, city, state, zip_code, bar_number, years_experience, hourly_rate, \
    photo_url, firm_id, created_at, updated_at";

pub struct SqlxLawyerRepository {
    pub pool: PgPool,
}

impl SqlxLawyerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn hydrate(&self, row: PgRow) -> anyhow::Result<Lawyer> {
        let id: Uuid = row.get("id");
        let status: String = row.get("status");
        let collections = self.stored_collections(id).await?.into_plain();
        Ok(Lawyer {
            id,
            user_id: row.get("user_id"),
            slug: row.get("slug"),
            status: parse_status(&status)?,
            details: LawyerDetails {
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                title: row.try_get("title").ok().flatten(),
                bio: row.try_get("bio").ok().flatten(),
                email: row.try_get("email").ok().flatten(),
                phone: row.try_get("phone").ok().flatten(),
                website: row.try_get("website").ok().flatten(),
                city: row.try_get("city").ok().flatten(),
                state: row.try_get("state").ok().flatten(),
                zip_code: row.try_get("zip_code").ok().flatten(),
                bar_number: row.try_get("bar_number").ok().flatten(),
                years_experience: row.try_get("years_experience").ok().flatten(),
                hourly_rate: row.try_get("hourly_rate").ok().flatten(),
                photo_url: row.try_get("photo_url").ok().flatten(),
                firm_id: row.try_get("firm_id").ok().flatten(),
            },
            collections,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    async fn fetch_by_id(&self, column: &'static str, id: Uuid) -> anyhow::Result<Option<Lawyer>> {
        let sql = format!("SELECT {LAWYER_COLUMNS} FROM lawyers WHERE {column} = $1");
        match sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await? {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SlugLookup for SqlxLawyerRepository {
    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> anyhow::Result<bool> {
        let row = sqlx::query(
            r#"SELECT EXISTS(
                   SELECT 1 FROM lawyers WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)
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
impl LawyerRepository for SqlxLawyerRepository {
    async fn insert_draft(
        &self,
        user_id: Uuid,
        slug: &str,
        details: &LawyerDetails,
    ) -> anyhow::Result<Lawyer> {
        let sql = format!(
            r#"INSERT INTO lawyers (user_id, slug, status, first_name, last_name, title, bio,
                   email, phone, website, city, state, zip_code, bar_number, years_experience,
                   hourly_rate, photo_url, firm_id)
               VALUES ($1, $2, 'DRAFT', $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
               RETURNING {LAWYER_COLUMNS}"#
        );
        let row = sqlx::query(&sql)
            .bind(user_id)
            .bind(slug)
            .bind(details.first_name.trim())
            .bind(details.last_name.trim())
            .bind(&details.title)
            .bind(&details.bio)
            .bind(&details.email)
            .bind(&details.phone)
            .bind(&details.website)
            .bind(&details.city)
            .bind(&details.state)
            .bind(&details.zip_code)
            .bind(&details.bar_number)
            .bind(details.years_experience)
            .bind(details.hourly_rate)
            .bind(&details.photo_url)
            .bind(details.firm_id)
            .fetch_one(&self.pool)
            .await?;
        self.hydrate(row).await
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Lawyer>> {
        self.fetch_by_id("id", id).await
    }

    async fn find_by_owner(&self, user_id: Uuid) -> anyhow::Result<Option<Lawyer>> {
        self.fetch_by_id("user_id", user_id).await
    }

    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Lawyer>> {
        let sql = format!("SELECT {LAWYER_COLUMNS} FROM lawyers WHERE slug = $1");
        match sqlx::query(&sql).bind(slug).fetch_optional(&self.pool).await? {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn update_profile(
        &self,
        id: Uuid,
        slug: &str,
        details: &LawyerDetails,
        status: ProfileStatus,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE lawyers SET slug = $2, status = $3, first_name = $4, last_name = $5,
                   title = $6, bio = $7, email = $8, phone = $9, website = $10, city = $11,
                   state = $12, zip_code = $13, bar_number = $14, years_experience = $15,
                   hourly_rate = $16, photo_url = $17, firm_id = $18, updated_at = now()
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(slug)
        .bind(status.as_str())
        .bind(details.first_name.trim())
        .bind(details.last_name.trim())
        .bind(&details.title)
        .bind(&details.bio)
        .bind(&details.email)
        .bind(&details.phone)
        .bind(&details.website)
        .bind(&details.city)
        .bind(&details.state)
        .bind(&details.zip_code)
        .bind(&details.bar_number)
        .bind(details.years_experience)
        .bind(details.hourly_rate)
        .bind(&details.photo_url)
        .bind(details.firm_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn stored_collections(&self, id: Uuid) -> anyhow::Result<StoredLawyerCollections> {
        let certifications = sqlx::query(
            r#"SELECT id, name, issuer, year FROM lawyer_certifications
               WHERE lawyer_id = $1 ORDER BY seq"#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| Stored {
            id: r.get("id"),
            item: Certification {
                name: r.get("name"),
                issuer: r.try_get("issuer").ok().flatten(),
                year: r.try_get("year").ok().flatten(),
            },
        })
        .collect();
        Ok(StoredLawyerCollections {
            specialisations: load_text(&self.pool, &SPECIALISATIONS, id).await?,
            languages: load_text(&self.pool, &LANGUAGES, id).await?,
            certifications,
            court_appearances: load_courts(
                &self.pool,
                "lawyer_court_appearances",
                "lawyer_id",
                id,
            )
            .await?,
        })
    }

    async fn apply_collections(
        &self,
        id: Uuid,
        delta: &LawyerCollectionsDelta,
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        apply_text(&mut tx, &SPECIALISATIONS, id, &delta.specialisations).await?;
        apply_text(&mut tx, &LANGUAGES, id, &delta.languages).await?;

        let certs = &delta.certifications;
        delete_rows(&mut tx, "lawyer_certifications", "lawyer_id", id, &certs.delete).await?;
        for row in &certs.update {
            sqlx::query(
                r#"UPDATE lawyer_certifications SET name = $2, issuer = $3, year = $4 WHERE id = $1"#,
            )
            .bind(row.id)
            .bind(row.item.name.trim())
            .bind(&row.item.issuer)
            .bind(row.item.year)
            .execute(&mut *tx)
            .await?;
        }
        for item in &certs.insert {
            sqlx::query(
                r#"INSERT INTO lawyer_certifications (lawyer_id, name, issuer, year)
                   VALUES ($1, $2, $3, $4)"#,
            )
            .bind(id)
            .bind(item.name.trim())
            .bind(&item.issuer)
            .bind(item.year)
            .execute(&mut *tx)
            .await?;
        }

        apply_courts(
            &mut tx,
            "lawyer_court_appearances",
            "lawyer_id",
            id,
            &delta.court_appearances,
        )
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn list_published_for_firm(&self, firm_id: Uuid) -> anyhow::Result<Vec<Lawyer>> {
        let sql = format!(
            "SELECT {LAWYER_COLUMNS} FROM lawyers WHERE firm_id = $1 AND status = 'PUBLISHED' \
             ORDER BY last_name, first_name"
        );
        let rows = sqlx::query(&sql).bind(firm_id).fetch_all(&self.pool).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(self.hydrate(row).await?);
        }
        Ok(out)
    }
}

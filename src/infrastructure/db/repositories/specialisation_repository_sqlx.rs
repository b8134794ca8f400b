use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::specialisation_repository::SpecialisationRepository;
use crate::domain::profiles::specialisation::Specialisation;
use crate::infrastructure::db::PgPool;

pub struct SqlxSpecialisationRepository {
    pub pool: PgPool,
}

impl SqlxSpecialisationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpecialisationRepository for SqlxSpecialisationRepository {
    async fn list_all(&self) -> anyhow::Result<Vec<Specialisation>> {
        let rows = sqlx::query(r#"SELECT id, name, slug FROM specialisations ORDER BY name"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| Specialisation {
                id: r.get("id"),
                name: r.get("name"),
                slug: r.get("slug"),
            })
            .collect())
    }
}

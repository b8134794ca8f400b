use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::search_repository::SearchRepository;
use crate::domain::profiles::entity::EntityType;
use crate::domain::search::directory::{DirectoryHit, SearchCriteria, SortOrder};
use crate::infrastructure::db::PgPool;

pub struct SqlxSearchRepository {
    pub pool: PgPool,
}

impl SqlxSearchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn like(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|v| {
        let escaped = v.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        format!("%{escaped}%")
    })
}

// Each type is ordered the same way the merged list will be, so the per-type
// LIMIT never drops a row the merged top-N would keep.
fn order_by(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Rating => "rating DESC, review_count DESC, lower(name)",
        SortOrder::Reviews => "review_count DESC, rating DESC, lower(name)",
        SortOrder::Experience => {
            "COALESCE(years_experience, -1) DESC, rating DESC, lower(name)"
        }
        SortOrder::Name => "lower(name)",
    }
}

fn map_hit(kind: EntityType, r: PgRow) -> DirectoryHit {
    DirectoryHit {
        kind,
        id: r.get("id"),
        slug: r.get("slug"),
        name: r.get("name"),
        city: r.try_get("city").ok().flatten(),
        state: r.try_get("state").ok().flatten(),
        specialisations: r.get("specialisations"),
        rating: r.get("rating"),
        review_count: r.get("review_count"),
        years_experience: r.try_get("years_experience").ok().flatten(),
        image_url: r.try_get("image_url").ok().flatten(),
    }
}

#[async_trait]
impl SearchRepository for SqlxSearchRepository {
    async fn search_lawyers(&self, criteria: &SearchCriteria) -> anyhow::Result<Vec<DirectoryHit>> {
        let sql = format!(
            r#"SELECT * FROM (
                 SELECT l.id, l.slug, l.first_name || ' ' || l.last_name AS name,
                        l.city, l.state, l.years_experience, l.photo_url AS image_url,
                        COALESCE(r.average, 0)::float8 AS rating,
                        COALESCE(r.total, 0)::int8 AS review_count,
                        COALESCE(
                            (SELECT array_agg(s.name ORDER BY s.seq)
                             FROM lawyer_specialisations s WHERE s.lawyer_id = l.id),
                            '{{}}'
                        ) AS specialisations
                 FROM lawyers l
                 LEFT JOIN (
                     SELECT lawyer_id, AVG(overall_rating) AS average, COUNT(*) AS total
                     FROM reviews
                     WHERE status = 'APPROVED' AND lawyer_id IS NOT NULL
                     GROUP BY lawyer_id
                 ) r ON r.lawyer_id = l.id
                 WHERE l.status = 'PUBLISHED'
                   AND ($1::text IS NULL
                        OR (l.first_name || ' ' || l.last_name) ILIKE $1
                        OR l.bio ILIKE $1
                        OR EXISTS (SELECT 1 FROM lawyer_specialisations s
                                   WHERE s.lawyer_id = l.id AND s.name ILIKE $1))
                   AND ($2::text IS NULL OR l.city ILIKE $2 OR l.zip_code ILIKE $2)
                   AND ($3::text IS NULL OR upper(l.state) = upper($3))
                   AND (cardinality($4::text[]) = 0
                        OR EXISTS (SELECT 1 FROM lawyer_specialisations s
                                   WHERE s.lawyer_id = l.id AND lower(s.name) = ANY($4)))
                   AND ($5::int IS NULL OR COALESCE(l.years_experience, 0) >= $5)
               ) hits
               WHERE ($6::float8 IS NULL OR rating >= $6)
               ORDER BY {order}
               LIMIT $7"#,
            order = order_by(criteria.sort),
        );
        let rows = sqlx::query(&sql)
            .bind(like(&criteria.query))
            .bind(like(&criteria.location))
            .bind(&criteria.state)
            .bind(&criteria.areas)
            .bind(criteria.min_experience)
            .bind(criteria.min_rating)
            .bind(criteria.take)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| map_hit(EntityType::Lawyer, r))
            .collect())
    }

    async fn search_firms(&self, criteria: &SearchCriteria) -> anyhow::Result<Vec<DirectoryHit>> {
        let sql = format!(
            r#"SELECT * FROM (
                 SELECT f.id, f.slug, f.name, loc.city, loc.state,
                        NULL::int AS years_experience, f.logo_url AS image_url,
                        COALESCE(r.average, 0)::float8 AS rating,
                        COALESCE(r.total, 0)::int8 AS review_count,
                        COALESCE(
                            (SELECT array_agg(p.name ORDER BY p.seq)
                             FROM firm_practice_areas p WHERE p.firm_id = f.id),
                            '{{}}'
                        ) AS specialisations
                 FROM law_firms f
                 LEFT JOIN LATERAL (
                     SELECT fl.city, fl.state FROM firm_locations fl
                     WHERE fl.firm_id = f.id
                     ORDER BY fl.is_primary DESC, fl.seq
                     LIMIT 1
                 ) loc ON TRUE
                 LEFT JOIN (
                     SELECT firm_id, AVG(overall_rating) AS average, COUNT(*) AS total
                     FROM reviews
                     WHERE status = 'APPROVED' AND firm_id IS NOT NULL
                     GROUP BY firm_id
                 ) r ON r.firm_id = f.id
                 WHERE f.status = 'PUBLISHED'
                   AND ($1::text IS NULL
                        OR f.name ILIKE $1
                        OR f.description ILIKE $1
                        OR EXISTS (SELECT 1 FROM firm_practice_areas p
                                   WHERE p.firm_id = f.id AND p.name ILIKE $1))
                   AND ($2::text IS NULL
                        OR EXISTS (SELECT 1 FROM firm_locations fl
                                   WHERE fl.firm_id = f.id
                                     AND (fl.city ILIKE $2 OR fl.zip_code ILIKE $2)))
                   AND ($3::text IS NULL
                        OR EXISTS (SELECT 1 FROM firm_locations fl
                                   WHERE fl.firm_id = f.id AND upper(fl.state) = upper($3)))
                   AND (cardinality($4::text[]) = 0
                        OR EXISTS (SELECT 1 FROM firm_practice_areas p
                                   WHERE p.firm_id = f.id AND lower(p.name) = ANY($4)))
               ) hits
               WHERE ($5::float8 IS NULL OR rating >= $5)
               ORDER BY {order}
               LIMIT $6"#,
            order = order_by(criteria.sort),
        );
        let rows = sqlx::query(&sql)
            .bind(like(&criteria.query))
            .bind(like(&criteria.location))
            .bind(&criteria.state)
            .bind(&criteria.areas)
            .bind(criteria.min_rating)
            .bind(criteria.take)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| map_hit(EntityType::Firm, r))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_escapes_wildcards() {
        assert_eq!(like(&Some("50%_off".into())).as_deref(), Some("%50\\%\\_off%"));
        assert_eq!(like(&None), None);
    }
}

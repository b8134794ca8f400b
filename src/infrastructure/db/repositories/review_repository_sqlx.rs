use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::review_repository::{NewReview, ReviewRepository};
use crate::domain::profiles::entity::ProfileRef;
use crate::domain::reviews::review::{
    RatingSummary, Ratings, Review, ReviewResponse, ReviewStatus,
};
use crate::infrastructure::db::PgPool;

const REVIEW_COLUMNS: &str = "id, lawyer_id, firm_id, author_id, author_name, title, content, \
    communication_rating, expertise_rating, value_rating, outcome_rating, overall_rating, \
    status, moderation_note, response_content, responded_at, created_at, updated_at";

pub struct SqlxReviewRepository {
    pub pool: PgPool,
}

impl SqlxReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_review(r: PgRow) -> anyhow::Result<Review> {
    let id: Uuid = r.get("id");
    let target = ProfileRef::from_columns(r.get("lawyer_id"), r.get("firm_id"))
        .ok_or_else(|| anyhow::anyhow!("review {id} has no single target"))?;
    let status: String = r.get("status");
    let response_content: Option<String> = r.try_get("response_content").ok().flatten();
    let responded_at: Option<chrono::DateTime<chrono::Utc>> =
        r.try_get("responded_at").ok().flatten();
    Ok(Review {
        id,
        target,
        author_id: r.get("author_id"),
        author_name: r.get("author_name"),
        title: r.get("title"),
        content: r.get("content"),
        ratings: Ratings {
            communication: r.get("communication_rating"),
            expertise: r.get("expertise_rating"),
            value: r.get("value_rating"),
            outcome: r.try_get("outcome_rating").ok().flatten(),
        },
        overall_rating: r.get("overall_rating"),
        status: ReviewStatus::parse(&status)
            .ok_or_else(|| anyhow::anyhow!("unknown review status {status}"))?,
        moderation_note: r.try_get("moderation_note").ok().flatten(),
        response: match (response_content, responded_at) {
            (Some(content), Some(responded_at)) => Some(ReviewResponse {
                content,
                responded_at,
            }),
            _ => None,
        },
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl ReviewRepository for SqlxReviewRepository {
    async fn create(&self, review: &NewReview) -> anyhow::Result<Review> {
        let sql = format!(
            r#"INSERT INTO reviews (lawyer_id, firm_id, author_id, author_name, title, content,
                   communication_rating, expertise_rating, value_rating, outcome_rating,
                   overall_rating)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING {REVIEW_COLUMNS}"#
        );
        let row = sqlx::query(&sql)
            .bind(review.target.lawyer_id())
            .bind(review.target.firm_id())
            .bind(review.author_id)
            .bind(&review.author_name)
            .bind(review.title.trim())
            .bind(review.content.trim())
            .bind(review.ratings.communication)
            .bind(review.ratings.expertise)
            .bind(review.ratings.value)
            .bind(review.ratings.outcome)
            .bind(review.overall_rating)
            .fetch_one(&self.pool)
            .await?;
        map_review(row)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Review>> {
        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(map_review).transpose()
    }

    async fn exists_for_author(
        &self,
        target: ProfileRef,
        author_id: Uuid,
    ) -> anyhow::Result<bool> {
        let row = sqlx::query(
            r#"SELECT EXISTS(
                   SELECT 1 FROM reviews
                   WHERE author_id = $1
                     AND lawyer_id IS NOT DISTINCT FROM $2
                     AND firm_id IS NOT DISTINCT FROM $3
               ) AS found"#,
        )
        .bind(author_id)
        .bind(target.lawyer_id())
        .bind(target.firm_id())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("found"))
    }

    async fn list_for_target(
        &self,
        target: ProfileRef,
        status: Option<ReviewStatus>,
    ) -> anyhow::Result<Vec<Review>> {
        let sql = format!(
            r#"SELECT {REVIEW_COLUMNS} FROM reviews
               WHERE lawyer_id IS NOT DISTINCT FROM $1
                 AND firm_id IS NOT DISTINCT FROM $2
                 AND ($3::text IS NULL OR status = $3)
               ORDER BY created_at DESC"#
        );
        let rows = sqlx::query(&sql)
            .bind(target.lawyer_id())
            .bind(target.firm_id())
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(map_review).collect()
    }

    async fn list_by_status(
        &self,
        status: Option<ReviewStatus>,
        limit: i64,
    ) -> anyhow::Result<Vec<Review>> {
        let sql = format!(
            r#"SELECT {REVIEW_COLUMNS} FROM reviews
               WHERE ($1::text IS NULL OR status = $1)
               ORDER BY created_at ASC
               LIMIT $2"#
        );
        let rows = sqlx::query(&sql)
            .bind(status.map(|s| s.as_str()))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(map_review).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
        note: Option<&str>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE reviews SET status = $2, moderation_note = $3, updated_at = now()
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(note)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn set_response(&self, id: Uuid, content: &str) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE reviews SET response_content = $2, responded_at = now(), updated_at = now()
               WHERE id = $1 AND response_content IS NULL"#,
        )
        .bind(id)
        .bind(content)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn rating_summary(&self, target: ProfileRef) -> anyhow::Result<RatingSummary> {
        let row = sqlx::query(
            r#"SELECT COALESCE(AVG(overall_rating), 0)::float8 AS average, COUNT(*) AS count
               FROM reviews
               WHERE status = 'APPROVED'
                 AND lawyer_id IS NOT DISTINCT FROM $1
                 AND firm_id IS NOT DISTINCT FROM $2"#,
        )
        .bind(target.lawyer_id())
        .bind(target.firm_id())
        .fetch_one(&self.pool)
        .await?;
        Ok(RatingSummary {
            average: row.get("average"),
            count: row.get("count"),
        })
    }
}

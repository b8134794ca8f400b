use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::ServiceError;
use crate::application::use_cases::search::search_directory::SearchDirectory;
use crate::bootstrap::app_context::AppContext;
use crate::domain::search::directory::{DirectoryHit, RawSearchParams, SearchCriteria};
use crate::presentation::http::error::ApiResult;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub areas: Option<String>,
    pub rating: Option<String>,
    pub experience: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub sort: Option<String>,
    pub take: Option<String>,
}

impl From<SearchQuery> for RawSearchParams {
    fn from(q: SearchQuery) -> Self {
        RawSearchParams {
            query: q.query,
            location: q.location,
            state: q.state,
            areas: q.areas,
            rating: q.rating,
            experience: q.experience,
            kind: q.kind,
            sort: q.sort,
            take: q.take,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// LAWYER or FIRM
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub specialisations: Vec<String>,
    pub rating: f64,
    pub review_count: i64,
    pub years_experience: Option<i32>,
    pub image_url: Option<String>,
}

impl From<DirectoryHit> for SearchHit {
    fn from(h: DirectoryHit) -> Self {
        SearchHit {
            kind: h.kind.as_str().to_string(),
            id: h.id,
            slug: h.slug,
            name: h.name,
            city: h.city,
            state: h.state,
            specialisations: h.specialisations,
            rating: h.rating,
            review_count: h.review_count,
            years_experience: h.years_experience,
            image_url: h.image_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub count: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/search", get(search)).with_state(ctx)
}

#[utoipa::path(get, path = "/api/search", tag = "Search", security(()),
    params(
        ("query" = Option<String>, Query, description = "Free text over names, bios and practice areas"),
        ("location" = Option<String>, Query, description = "City or ZIP code"),
        ("state" = Option<String>, Query, description = "State code"),
        ("areas" = Option<String>, Query, description = "Comma separated practice areas"),
        ("rating" = Option<f64>, Query, description = "Minimum average rating"),
        ("experience" = Option<i32>, Query, description = "Minimum years of experience (lawyers only)"),
        ("type" = Option<String>, Query, description = "lawyer, firm or all"),
        ("sort" = Option<String>, Query, description = "rating, reviews, experience or name"),
        ("take" = Option<i64>, Query, description = "Max results, 1..=100")
    ),
    responses((status = 200, body = SearchResponse), (status = 400, description = "Invalid filter")))]
pub async fn search(
    State(ctx): State<AppContext>,
    q: Option<Query<SearchQuery>>,
) -> ApiResult<Json<SearchResponse>> {
    let raw = q.map(|Query(v)| v).unwrap_or_default();
    let criteria = SearchCriteria::parse(raw.into(), ctx.cfg.search_default_take)
        .map_err(ServiceError::from)?;
    let repo = ctx.search_repo();
    let uc = SearchDirectory {
        search: repo.as_ref(),
    };
    let results: Vec<SearchHit> = uc
        .execute(&criteria)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(SearchResponse {
        count: results.len(),
        results,
    }))
}

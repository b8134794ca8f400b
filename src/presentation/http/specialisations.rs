use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::specialisations::list_specialisations::ListSpecialisations;
use crate::bootstrap::app_context::AppContext;
use crate::domain::profiles::specialisation::Specialisation;
use crate::presentation::http::error::ApiResult;

#[derive(Debug, Serialize, ToSchema)]
pub struct SpecialisationView {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<Specialisation> for SpecialisationView {
    fn from(s: Specialisation) -> Self {
        SpecialisationView {
            id: s.id,
            name: s.name,
            slug: s.slug,
        }
    }
}

#[utoipa::path(get, path = "/api/specialisations", tag = "Specialisations", security(()),
    responses((status = 200, body = [SpecialisationView])))]
pub async fn list_specialisations(
    State(ctx): State<AppContext>,
) -> ApiResult<Json<Vec<SpecialisationView>>> {
    let repo = ctx.specialisation_repo();
    let uc = ListSpecialisations {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/specialisations", get(list_specialisations))
        .with_state(ctx)
}

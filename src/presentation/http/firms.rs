use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::profiles::{OwnFirmProfileDto, SubmitMode};
use crate::application::use_cases::firms::get_own_profile::GetOwnFirmProfile;
use crate::application::use_cases::firms::get_public_profile::GetPublicFirm;
use crate::application::use_cases::firms::submit_profile::{FirmSubmission, SubmitFirmProfile};
use crate::bootstrap::app_context::AppContext;
use crate::domain::profiles::firm::{FirmCollections, FirmDetails};
use crate::presentation::http::auth::{Bearer, resolve_actor};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{ApiJson, null_as_default};
use crate::presentation::http::views::{
    CourtAppearanceBody, FirmView, LawyerView, LocationBody, PendingChangeView, RatingView,
    SubmissionResponse,
};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FirmProfileRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub founded_year: Option<i32>,
    pub firm_size: Option<String>,
    pub logo_url: Option<String>,
    pub locations: Vec<LocationBody>,
    pub practice_areas: Vec<String>,
    pub languages: Vec<String>,
    pub court_appearances: Vec<CourtAppearanceBody>,
}

impl From<FirmProfileRequest> for FirmSubmission {
    fn from(r: FirmProfileRequest) -> Self {
        FirmSubmission {
            details: FirmDetails {
                name: r.name,
                email: r.email,
                phone: r.phone,
                website: r.website,
                description: r.description,
                founded_year: r.founded_year,
                firm_size: r.firm_size,
                logo_url: r.logo_url,
            },
            collections: FirmCollections {
                locations: r.locations.into_iter().map(Into::into).collect(),
                practice_areas: r.practice_areas,
                languages: r.languages,
                court_appearances: r.court_appearances.into_iter().map(Into::into).collect(),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnFirmProfileResponse {
    pub firm: FirmView,
    pub effective_status: String,
    pub pending_change: Option<PendingChangeView>,
}

impl From<OwnFirmProfileDto> for OwnFirmProfileResponse {
    fn from(d: OwnFirmProfileDto) -> Self {
        OwnFirmProfileResponse {
            firm: d.firm.into(),
            effective_status: d.effective_status.as_str().to_string(),
            pending_change: d.pending_change.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PublicFirmResponse {
    pub firm: FirmView,
    pub rating: RatingView,
    /// Published lawyers who list this firm
    pub lawyers: Vec<LawyerView>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/firm/profile",
            get(get_own_profile).post(create_profile).put(update_profile),
        )
        .route("/firms/:slug", get(get_public_profile))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/firm/profile", tag = "Firms", responses(
    (status = 200, body = OwnFirmProfileResponse),
    (status = 401, description = "No session or role not allowed"),
    (status = 404, description = "No profile yet")
))]
pub async fn get_own_profile(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
) -> ApiResult<Json<OwnFirmProfileResponse>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let firms = ctx.firm_repo();
    let changes = ctx.change_repo();
    let uc = GetOwnFirmProfile {
        firms: firms.as_ref(),
        changes: changes.as_ref(),
    };
    Ok(Json(uc.execute(&actor).await?.into()))
}

#[utoipa::path(post, path = "/api/firm/profile", tag = "Firms", request_body = FirmProfileRequest, responses(
    (status = 200, body = SubmissionResponse),
    (status = 400, description = "Validation failed or profile already exists"),
    (status = 401, description = "No session or role not allowed")
))]
pub async fn create_profile(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    ApiJson(req): ApiJson<FirmProfileRequest>,
) -> ApiResult<Json<SubmissionResponse>> {
    submit(ctx, bearer, SubmitMode::Create, req).await
}

#[utoipa::path(put, path = "/api/firm/profile", tag = "Firms", request_body = FirmProfileRequest, responses(
    (status = 200, body = SubmissionResponse),
    (status = 400, description = "Validation failed"),
    (status = 401, description = "No session or role not allowed"),
    (status = 404, description = "No profile to update")
))]
pub async fn update_profile(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    ApiJson(req): ApiJson<FirmProfileRequest>,
) -> ApiResult<Json<SubmissionResponse>> {
    submit(ctx, bearer, SubmitMode::Update, req).await
}

async fn submit(
    ctx: AppContext,
    bearer: Option<Bearer>,
    mode: SubmitMode,
    req: FirmProfileRequest,
) -> ApiResult<Json<SubmissionResponse>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let firms = ctx.firm_repo();
    let changes = ctx.change_repo();
    let audit = ctx.audit_repo();
    let users = ctx.user_repo();
    let notifications = ctx.notification_repo();
    let uc = SubmitFirmProfile {
        firms: firms.as_ref(),
        changes: changes.as_ref(),
        audit: audit.as_ref(),
        users: users.as_ref(),
        notifications: notifications.as_ref(),
    };
    let outcome = uc.execute(&actor, mode, req.into()).await?;
    Ok(Json(outcome.into()))
}

#[utoipa::path(get, path = "/api/firms/{slug}", tag = "Firms", security(()),
    params(("slug" = String, Path, description = "Firm slug")),
    responses(
        (status = 200, body = PublicFirmResponse),
        (status = 404, description = "Not found or not published")
    ))]
pub async fn get_public_profile(
    State(ctx): State<AppContext>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PublicFirmResponse>> {
    let firms = ctx.firm_repo();
    let lawyers = ctx.lawyer_repo();
    let reviews = ctx.review_repo();
    let uc = GetPublicFirm {
        firms: firms.as_ref(),
        lawyers: lawyers.as_ref(),
        reviews: reviews.as_ref(),
    };
    let dto = uc.execute(&slug).await?;
    Ok(Json(PublicFirmResponse {
        firm: dto.firm.into(),
        rating: dto.rating.into(),
        lawyers: dto.lawyers.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profiles::entity::ProfileStatus;
    use crate::domain::users::user::Role;
    use crate::presentation::http::test_support::{TestApp, read_json};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn firm_submission_requires_contact_fields() {
        let app = TestApp::new();
        let (_, token) = app.token_for(Role::FirmOwner, "Olga");
        let res = app
            .post(
                "/api/firm/profile",
                Some(&token),
                json!({"name": "Doe & Partners", "email": "office@doe.test"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.store.firm_count(), 0);
    }

    #[tokio::test]
    async fn null_phone_is_a_validation_error() {
        let app = TestApp::new();
        let (_, token) = app.token_for(Role::FirmOwner, "Olga");
        let res = app
            .post(
                "/api/firm/profile",
                Some(&token),
                json!({"name": "Doe & Partners", "email": "office@doe.test", "phone": null}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(res).await["error"].is_string());
        assert_eq!(app.store.firm_count(), 0);
    }

    #[tokio::test]
    async fn lawyers_cannot_create_firms() {
        let app = TestApp::new();
        let (_, token) = app.token_for(Role::Lawyer, "Jane");
        let res = app
            .post(
                "/api/firm/profile",
                Some(&token),
                json!({"name": "Doe & Partners", "email": "office@doe.test", "phone": "555-0100"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn public_firm_lists_rating_and_lawyers() {
        let app = TestApp::new();
        let owner = app.store.add_user(Role::FirmOwner, "Olga");
        let firm_id = app.store.seed_firm(
            owner.user_id().unwrap(),
            "doe-partners",
            FirmDetails {
                name: "Doe & Partners".into(),
                email: "office@doe.test".into(),
                phone: "555-0100".into(),
                ..Default::default()
            },
            ProfileStatus::Published,
        );
        let res = app.get("/api/firms/doe-partners", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = read_json(res).await;
        assert_eq!(body["firm"]["id"], json!(firm_id));
        assert_eq!(body["rating"]["count"], json!(0));
        assert_eq!(body["lawyers"], json!([]));
    }
}

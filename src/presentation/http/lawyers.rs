use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::profiles::{OwnLawyerProfileDto, SubmitMode};
use crate::application::use_cases::lawyers::get_own_profile::GetOwnLawyerProfile;
use crate::application::use_cases::lawyers::get_public_profile::GetPublicLawyer;
use crate::application::use_cases::lawyers::submit_profile::{
    LawyerSubmission, SubmitLawyerProfile,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::profiles::lawyer::{LawyerCollections, LawyerDetails};
use crate::presentation::http::auth::{Bearer, resolve_actor};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{ApiJson, null_as_default};
use crate::presentation::http::views::{
    CertificationBody, CourtAppearanceBody, LawyerView, PendingChangeView, RatingView,
    SubmissionResponse,
};

/// Flat lawyer profile form. Missing required fields fail validation with 400.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LawyerProfileRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub bar_number: Option<String>,
    pub years_experience: Option<i32>,
    pub hourly_rate: Option<i32>,
    pub photo_url: Option<String>,
    pub firm_id: Option<Uuid>,
    pub specialisations: Vec<String>,
    pub languages: Vec<String>,
    pub certifications: Vec<CertificationBody>,
    pub court_appearances: Vec<CourtAppearanceBody>,
}

impl From<LawyerProfileRequest> for LawyerSubmission {
    fn from(r: LawyerProfileRequest) -> Self {
        LawyerSubmission {
            details: LawyerDetails {
                first_name: r.first_name,
                last_name: r.last_name,
                title: r.title,
                bio: r.bio,
                email: r.email,
                phone: r.phone,
                website: r.website,
                city: r.city,
                state: r.state,
                zip_code: r.zip_code,
                bar_number: r.bar_number,
                years_experience: r.years_experience,
                hourly_rate: r.hourly_rate,
                photo_url: r.photo_url,
                firm_id: r.firm_id,
            },
            collections: LawyerCollections {
                specialisations: r.specialisations,
                languages: r.languages,
                certifications: r.certifications.into_iter().map(Into::into).collect(),
                court_appearances: r.court_appearances.into_iter().map(Into::into).collect(),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnLawyerProfileResponse {
    pub lawyer: LawyerView,
    /// DRAFT, PENDING or PUBLISHED
    pub effective_status: String,
    pub pending_change: Option<PendingChangeView>,
}

impl From<OwnLawyerProfileDto> for OwnLawyerProfileResponse {
    fn from(d: OwnLawyerProfileDto) -> Self {
        OwnLawyerProfileResponse {
            lawyer: d.lawyer.into(),
            effective_status: d.effective_status.as_str().to_string(),
            pending_change: d.pending_change.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PublicLawyerResponse {
    pub lawyer: LawyerView,
    pub rating: RatingView,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/lawyer/profile",
            get(get_own_profile).post(create_profile).put(update_profile),
        )
        .route("/lawyers/:slug", get(get_public_profile))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/lawyer/profile", tag = "Lawyers", responses(
    (status = 200, body = OwnLawyerProfileResponse),
    (status = 401, description = "No session or role not allowed"),
    (status = 404, description = "No profile yet")
))]
pub async fn get_own_profile(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
) -> ApiResult<Json<OwnLawyerProfileResponse>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let lawyers = ctx.lawyer_repo();
    let changes = ctx.change_repo();
    let uc = GetOwnLawyerProfile {
        lawyers: lawyers.as_ref(),
        changes: changes.as_ref(),
    };
    Ok(Json(uc.execute(&actor).await?.into()))
}

#[utoipa::path(post, path = "/api/lawyer/profile", tag = "Lawyers", request_body = LawyerProfileRequest, responses(
    (status = 200, body = SubmissionResponse),
    (status = 400, description = "Validation failed or profile already exists"),
    (status = 401, description = "No session or role not allowed")
))]
pub async fn create_profile(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    ApiJson(req): ApiJson<LawyerProfileRequest>,
) -> ApiResult<Json<SubmissionResponse>> {
    submit(ctx, bearer, SubmitMode::Create, req).await
}

#[utoipa::path(put, path = "/api/lawyer/profile", tag = "Lawyers", request_body = LawyerProfileRequest, responses(
    (status = 200, body = SubmissionResponse),
    (status = 400, description = "Validation failed"),
    (status = 401, description = "No session or role not allowed"),
    (status = 404, description = "No profile to update")
))]
pub async fn update_profile(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    ApiJson(req): ApiJson<LawyerProfileRequest>,
) -> ApiResult<Json<SubmissionResponse>> {
    submit(ctx, bearer, SubmitMode::Update, req).await
}

async fn submit(
    ctx: AppContext,
    bearer: Option<Bearer>,
    mode: SubmitMode,
    req: LawyerProfileRequest,
) -> ApiResult<Json<SubmissionResponse>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let lawyers = ctx.lawyer_repo();
    let firms = ctx.firm_repo();
    let changes = ctx.change_repo();
    let audit = ctx.audit_repo();
    let users = ctx.user_repo();
    let notifications = ctx.notification_repo();
    let uc = SubmitLawyerProfile {
        lawyers: lawyers.as_ref(),
        firms: firms.as_ref(),
        changes: changes.as_ref(),
        audit: audit.as_ref(),
        users: users.as_ref(),
        notifications: notifications.as_ref(),
    };
    let outcome = uc.execute(&actor, mode, req.into()).await?;
    Ok(Json(outcome.into()))
}

#[utoipa::path(get, path = "/api/lawyers/{slug}", tag = "Lawyers", security(()),
    params(("slug" = String, Path, description = "Lawyer slug")),
    responses(
        (status = 200, body = PublicLawyerResponse),
        (status = 404, description = "Not found or not published")
    ))]
pub async fn get_public_profile(
    State(ctx): State<AppContext>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PublicLawyerResponse>> {
    let lawyers = ctx.lawyer_repo();
    let reviews = ctx.review_repo();
    let uc = GetPublicLawyer {
        lawyers: lawyers.as_ref(),
        reviews: reviews.as_ref(),
    };
    let dto = uc.execute(&slug).await?;
    Ok(Json(PublicLawyerResponse {
        lawyer: dto.lawyer.into(),
        rating: dto.rating.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::user::Role;
    use crate::presentation::http::test_support::{TestApp, read_json};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn submission_missing_last_name_persists_nothing() {
        let app = TestApp::new();
        let (_, token) = app.token_for(Role::Lawyer, "Jane");
        let res = app
            .post("/api/lawyer/profile", Some(&token), json!({"firstName": "Jane"}))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.store.lawyer_count(), 0);
        assert!(app.store.change_list().is_empty());
    }

    #[tokio::test]
    async fn null_last_name_is_a_validation_error() {
        let app = TestApp::new();
        let (_, token) = app.token_for(Role::Lawyer, "Jane");
        let res = app
            .post(
                "/api/lawyer/profile",
                Some(&token),
                json!({"firstName": "Jane", "lastName": null}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(res).await["error"].is_string());
        assert_eq!(app.store.lawyer_count(), 0);
    }

    #[tokio::test]
    async fn mistyped_fields_return_json_errors() {
        let app = TestApp::new();
        let (_, token) = app.token_for(Role::Lawyer, "Jane");
        let res = app
            .post(
                "/api/lawyer/profile",
                Some(&token),
                json!({"firstName": "Jane", "lastName": "Doe", "yearsExperience": "ten"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(res).await["error"].is_string());
        assert_eq!(app.store.lawyer_count(), 0);
    }

    #[tokio::test]
    async fn clients_cannot_write_lawyer_profiles() {
        let app = TestApp::new();
        let (_, token) = app.token_for(Role::Client, "Carl");
        let res = app
            .post(
                "/api/lawyer/profile",
                Some(&token),
                json!({"firstName": "Jane", "lastName": "Doe"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(app.store.lawyer_count(), 0);
    }

    #[tokio::test]
    async fn own_profile_reports_pending_effective_status() {
        let app = TestApp::new();
        let (_, token) = app.token_for(Role::Lawyer, "Jane");
        let res = app
            .post(
                "/api/lawyer/profile",
                Some(&token),
                json!({"firstName": "Jane", "lastName": "Doe", "specialisations": ["Family Law"]}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = read_json(res).await;
        assert_eq!(body["slug"], json!("jane-doe"));
        assert_eq!(body["created"], json!(true));

        let own = read_json(app.get("/api/lawyer/profile", Some(&token)).await).await;
        assert_eq!(own["lawyer"]["status"], json!("DRAFT"));
        assert_eq!(own["effectiveStatus"], json!("PENDING"));
        assert_eq!(own["pendingChange"]["changes"]["entityType"], json!("LAWYER"));
        assert_eq!(
            own["lawyer"]["collections"]["specialisations"],
            json!(["Family Law"])
        );
    }

    #[tokio::test]
    async fn drafts_are_not_public() {
        let app = TestApp::new();
        let (_, token) = app.token_for(Role::Lawyer, "Jane");
        app.post(
            "/api/lawyer/profile",
            Some(&token),
            json!({"firstName": "Jane", "lastName": "Doe"}),
        )
        .await;
        let res = app.get("/api/lawyers/jane-doe", None).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

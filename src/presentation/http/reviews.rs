use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::reviews::list_moderation_queue::ListModerationQueue;
use crate::application::use_cases::reviews::list_reviews::ListReviews;
use crate::application::use_cases::reviews::moderate_review::ModerateReview;
use crate::application::use_cases::reviews::respond_to_review::RespondToReview;
use crate::application::use_cases::reviews::submit_review::{ReviewSubmission, SubmitReview};
use crate::bootstrap::app_context::AppContext;
use crate::domain::profiles::entity::{EntityType, ProfileRef};
use crate::domain::reviews::review::{ModerationAction, Ratings, ReviewStatus};
use crate::presentation::http::auth::{Bearer, resolve_actor};
use crate::presentation::http::error::{ApiError, ApiResult};
use crate::presentation::http::extract::ApiJson;
use crate::presentation::http::views::{ReviewView, parse_uuid};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitReviewRequest {
    /// LAWYER or FIRM
    pub target_type: String,
    pub target_id: String,
    pub title: String,
    pub content: String,
    pub communication_rating: i16,
    pub expertise_rating: i16,
    pub value_rating: i16,
    pub outcome_rating: Option<i16>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsQuery {
    pub target_type: Option<String>,
    pub target_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModerationQueueQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ModerateReviewRequest {
    /// approve, reject or flag
    pub action: String,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RespondRequest {
    pub content: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/reviews", get(list_reviews).post(submit_review))
        .route("/reviews/:id/response", post(respond_to_review))
        .route("/admin/reviews", get(moderation_queue))
        .route("/admin/reviews/:id", post(moderate_review))
        .with_state(ctx)
}

fn target_ref(target_type: &str, target_id: &str) -> ApiResult<ProfileRef> {
    let kind =
        EntityType::parse(target_type).ok_or_else(|| ApiError::bad_request("Invalid targetType"))?;
    Ok(ProfileRef::new(kind, parse_uuid("targetId", target_id)?))
}

#[utoipa::path(post, path = "/api/reviews", tag = "Reviews", request_body = SubmitReviewRequest,
    responses(
        (status = 200, body = ReviewView),
        (status = 400, description = "Invalid ratings or duplicate review"),
        (status = 401, description = "Clients only"),
        (status = 404, description = "Target not found or not published")
    ))]
pub async fn submit_review(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    ApiJson(req): ApiJson<SubmitReviewRequest>,
) -> ApiResult<Json<ReviewView>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let target = target_ref(&req.target_type, &req.target_id)?;
    let reviews = ctx.review_repo();
    let lawyers = ctx.lawyer_repo();
    let firms = ctx.firm_repo();
    let users = ctx.user_repo();
    let notifications = ctx.notification_repo();
    let uc = SubmitReview {
        reviews: reviews.as_ref(),
        lawyers: lawyers.as_ref(),
        firms: firms.as_ref(),
        users: users.as_ref(),
        notifications: notifications.as_ref(),
    };
    let review = uc
        .execute(
            &actor,
            ReviewSubmission {
                target,
                title: req.title,
                content: req.content,
                ratings: Ratings {
                    communication: req.communication_rating,
                    expertise: req.expertise_rating,
                    value: req.value_rating,
                    outcome: req.outcome_rating,
                },
            },
        )
        .await?;
    Ok(Json(ReviewView::public(review)))
}

#[utoipa::path(get, path = "/api/reviews", tag = "Reviews", security(()),
    params(
        ("targetType" = String, Query, description = "LAWYER or FIRM"),
        ("targetId" = Uuid, Query, description = "Lawyer or firm ID")
    ),
    responses((status = 200, body = [ReviewView]), (status = 400, description = "Missing target")))]
pub async fn list_reviews(
    State(ctx): State<AppContext>,
    Query(q): Query<ListReviewsQuery>,
) -> ApiResult<Json<Vec<ReviewView>>> {
    let (Some(target_type), Some(target_id)) = (q.target_type, q.target_id) else {
        return Err(ApiError::bad_request("targetType and targetId are required"));
    };
    let target = target_ref(&target_type, &target_id)?;
    let reviews = ctx.review_repo();
    let uc = ListReviews {
        reviews: reviews.as_ref(),
    };
    let items = uc.execute(target).await?;
    Ok(Json(items.into_iter().map(ReviewView::public).collect()))
}

#[utoipa::path(get, path = "/api/admin/reviews", tag = "Reviews",
    params(
        ("status" = Option<String>, Query, description = "PENDING, APPROVED, REJECTED or FLAGGED; all when omitted"),
        ("limit" = Option<i64>, Query, description = "Max rows (default 50)")
    ),
    responses((status = 200, body = [ReviewView]), (status = 401, description = "Admin only")))]
pub async fn moderation_queue(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    q: Option<Query<ModerationQueueQuery>>,
) -> ApiResult<Json<Vec<ReviewView>>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let (status, limit) = q.map(|Query(v)| (v.status, v.limit)).unwrap_or((None, None));
    let status = match status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Some(
            ReviewStatus::parse(s).ok_or_else(|| ApiError::bad_request("Invalid status"))?,
        ),
        None => None,
    };
    let reviews = ctx.review_repo();
    let uc = ListModerationQueue {
        reviews: reviews.as_ref(),
    };
    let items = uc.execute(&actor, status, limit.unwrap_or(50)).await?;
    Ok(Json(items.into_iter().map(ReviewView::moderation).collect()))
}

#[utoipa::path(post, path = "/api/admin/reviews/{id}", tag = "Reviews", request_body = ModerateReviewRequest,
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, body = ReviewView),
        (status = 400, description = "Unknown action or transition not allowed"),
        (status = 401, description = "Admin only"),
        (status = 404, description = "Review not found")
    ))]
pub async fn moderate_review(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<ModerateReviewRequest>,
) -> ApiResult<Json<ReviewView>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let action =
        ModerationAction::parse(&req.action).ok_or_else(|| ApiError::bad_request("Invalid action"))?;
    let reviews = ctx.review_repo();
    let lawyers = ctx.lawyer_repo();
    let firms = ctx.firm_repo();
    let audit = ctx.audit_repo();
    let notifications = ctx.notification_repo();
    let uc = ModerateReview {
        reviews: reviews.as_ref(),
        lawyers: lawyers.as_ref(),
        firms: firms.as_ref(),
        audit: audit.as_ref(),
        notifications: notifications.as_ref(),
    };
    let review = uc.execute(&actor, id, action, req.note).await?;
    Ok(Json(ReviewView::moderation(review)))
}

#[utoipa::path(post, path = "/api/reviews/{id}/response", tag = "Reviews", request_body = RespondRequest,
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, body = ReviewView),
        (status = 400, description = "Review not approved or already answered"),
        (status = 401, description = "Only the owner of the reviewed profile"),
        (status = 404, description = "Review not found")
    ))]
pub async fn respond_to_review(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<RespondRequest>,
) -> ApiResult<Json<ReviewView>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let reviews = ctx.review_repo();
    let lawyers = ctx.lawyer_repo();
    let firms = ctx.firm_repo();
    let audit = ctx.audit_repo();
    let uc = RespondToReview {
        reviews: reviews.as_ref(),
        lawyers: lawyers.as_ref(),
        firms: firms.as_ref(),
        audit: audit.as_ref(),
    };
    let review = uc.execute(&actor, id, &req.content).await?;
    Ok(Json(ReviewView::public(review)))
}

#[cfg(test)]
mod tests {
    use crate::domain::profiles::entity::ProfileStatus;
    use crate::domain::profiles::lawyer::{LawyerCollections, LawyerDetails};
    use crate::domain::users::user::Role;
    use crate::presentation::http::test_support::{TestApp, read_json};
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use uuid::Uuid;

    fn published_lawyer(app: &TestApp, owner: Uuid) -> Uuid {
        app.store.seed_lawyer(
            owner,
            "jane-doe",
            LawyerDetails {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                ..Default::default()
            },
            LawyerCollections::default(),
            ProfileStatus::Published,
        )
    }

    fn review_body(lawyer: Uuid) -> Value {
        json!({
            "targetType": "LAWYER",
            "targetId": lawyer,
            "title": "Clear advice",
            "content": "Explained every step.",
            "communicationRating": 5,
            "expertiseRating": 4,
            "valueRating": 3,
            "outcomeRating": 4
        })
    }

    #[tokio::test]
    async fn review_lifecycle_through_moderation_and_response() {
        let app = TestApp::new();
        let (owner, owner_token) = app.token_for(Role::Lawyer, "Jane");
        let lawyer = published_lawyer(&app, owner);
        let (_, client) = app.token_for(Role::Client, "Carl");
        let (_, admin) = app.token_for(Role::Admin, "Ada");

        let res = app.post("/api/reviews", Some(&client), review_body(lawyer)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let review = read_json(res).await;
        assert_eq!(review["overallRating"], json!(4.0));
        assert_eq!(review["status"], json!("PENDING"));
        let id = review["id"].as_str().unwrap().to_string();

        let dup = app.post("/api/reviews", Some(&client), review_body(lawyer)).await;
        assert_eq!(dup.status(), StatusCode::BAD_REQUEST);

        let list_path = format!("/api/reviews?targetType=LAWYER&targetId={lawyer}");
        let listed = read_json(app.get(&list_path, None).await).await;
        assert_eq!(listed, json!([]));

        let res = app
            .post(&format!("/api/admin/reviews/{id}"), Some(&admin), json!({"action": "approve"}))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let listed = read_json(app.get(&list_path, None).await).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
        assert!(listed[0].get("moderationNote").is_none());

        let res = app
            .post(
                &format!("/api/reviews/{id}/response"),
                Some(&client),
                json!({"content": "Not mine to answer"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = app
            .post(
                &format!("/api/reviews/{id}/response"),
                Some(&owner_token),
                json!({"content": "Thank you"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(read_json(res).await["response"]["content"], json!("Thank you"));
    }

    #[tokio::test]
    async fn rejected_reviews_stay_rejected() {
        let app = TestApp::new();
        let (owner, _) = app.token_for(Role::Lawyer, "Jane");
        let lawyer = published_lawyer(&app, owner);
        let (_, client) = app.token_for(Role::Client, "Carl");
        let (_, admin) = app.token_for(Role::Admin, "Ada");
        let review = read_json(app.post("/api/reviews", Some(&client), review_body(lawyer)).await).await;
        let path = format!("/api/admin/reviews/{}", review["id"].as_str().unwrap());

        let res = app.post(&path, Some(&admin), json!({"action": "reject", "note": "spam"})).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(read_json(res).await["moderationNote"], json!("spam"));

        let res = app.post(&path, Some(&admin), json!({"action": "approve"})).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_requires_a_target() {
        let app = TestApp::new();
        let res = app.get("/api/reviews?targetType=LAWYER", None).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

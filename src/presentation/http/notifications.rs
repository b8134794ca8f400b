use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::notifications::list_notifications::ListNotifications;
use crate::application::use_cases::notifications::mark_all_read::MarkAllNotificationsRead;
use crate::application::use_cases::notifications::mark_read::MarkNotificationRead;
use crate::bootstrap::app_context::AppContext;
use crate::domain::notifications::notification::Notification;
use crate::presentation::http::auth::{Bearer, resolve_actor};
use crate::presentation::http::error::ApiResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsQuery {
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Notification> for NotificationView {
    fn from(n: Notification) -> Self {
        NotificationView {
            id: n.id,
            kind: n.kind,
            title: n.title,
            message: n.message,
            link: n.link,
            read: n.read,
            created_at: n.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/read-all", post(mark_all_read))
        .route("/notifications/:id/read", post(mark_read))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/notifications", tag = "Notifications",
    params(
        ("unreadOnly" = Option<bool>, Query, description = "Only unread notifications"),
        ("limit" = Option<i64>, Query, description = "Max rows (default 50)")
    ),
    responses((status = 200, body = [NotificationView]), (status = 401, description = "No session")))]
pub async fn list_notifications(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    q: Option<Query<ListNotificationsQuery>>,
) -> ApiResult<Json<Vec<NotificationView>>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let (unread_only, limit) = q
        .map(|Query(v)| (v.unread_only, v.limit))
        .unwrap_or((None, None));
    let repo = ctx.notification_repo();
    let uc = ListNotifications {
        notifications: repo.as_ref(),
    };
    let items = uc
        .execute(&actor, unread_only.unwrap_or(false), limit.unwrap_or(50))
        .await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/notifications/{id}/read", tag = "Notifications",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses((status = 204), (status = 401, description = "No session"), (status = 404, description = "Not found")))]
pub async fn mark_read(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let repo = ctx.notification_repo();
    let uc = MarkNotificationRead {
        notifications: repo.as_ref(),
    };
    uc.execute(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/notifications/read-all", tag = "Notifications",
    responses((status = 200, body = MarkAllReadResponse), (status = 401, description = "No session")))]
pub async fn mark_all_read(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
) -> ApiResult<Json<MarkAllReadResponse>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let repo = ctx.notification_repo();
    let uc = MarkAllNotificationsRead {
        notifications: repo.as_ref(),
    };
    let updated = uc.execute(&actor).await?;
    Ok(Json(MarkAllReadResponse { updated }))
}

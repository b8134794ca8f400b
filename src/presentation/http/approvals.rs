use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::profiles::{ChangeDecisionDto, LiveProfileDto};
use crate::application::use_cases::approvals::approve_change::ApproveChange;
use crate::application::use_cases::approvals::get_change::GetChange;
use crate::application::use_cases::approvals::list_changes::ListChanges;
use crate::application::use_cases::approvals::reject_change::RejectChange;
use crate::bootstrap::app_context::AppContext;
use crate::domain::changes::pending_change::ChangeStatus;
use crate::presentation::http::auth::{Bearer, resolve_actor};
use crate::presentation::http::error::{ApiError, ApiResult};
use crate::presentation::http::extract::ApiJson;
use crate::presentation::http::views::{FirmView, LawyerView, PendingChangeView, parse_uuid};

#[derive(Debug, Deserialize)]
pub struct ListChangesQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDetailResponse {
    pub change: PendingChangeView,
    /// Live lawyer as it is before the decision
    pub current_lawyer: Option<LawyerView>,
    /// Live firm as it is before the decision
    pub current_firm: Option<FirmView>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessChangeRequest {
    pub change_id: String,
    /// approve or reject
    pub action: String,
    pub note: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDecisionResponse {
    pub change_id: Uuid,
    pub status: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub slug: Option<String>,
}

impl From<ChangeDecisionDto> for ChangeDecisionResponse {
    fn from(d: ChangeDecisionDto) -> Self {
        ChangeDecisionResponse {
            change_id: d.change_id,
            status: d.status.as_str().to_string(),
            entity_type: d.entity.entity_type().as_str().to_string(),
            entity_id: d.entity.id(),
            slug: d.slug,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/admin/approvals", get(list_changes).post(process_change))
        .route("/admin/approvals/:id", get(get_change))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/admin/approvals", tag = "Approvals",
    params(
        ("status" = Option<String>, Query, description = "PENDING, APPROVED or REJECTED; all when omitted"),
        ("limit" = Option<i64>, Query, description = "Max rows (default 50)")
    ),
    responses(
        (status = 200, body = [PendingChangeView]),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Admin only")
    ))]
pub async fn list_changes(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    q: Option<Query<ListChangesQuery>>,
) -> ApiResult<Json<Vec<PendingChangeView>>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let (status, limit) = q.map(|Query(v)| (v.status, v.limit)).unwrap_or((None, None));
    let status = match status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Some(
            ChangeStatus::parse(s).ok_or_else(|| ApiError::bad_request("Invalid status"))?,
        ),
        None => None,
    };
    let changes = ctx.change_repo();
    let uc = ListChanges {
        changes: changes.as_ref(),
    };
    let items = uc.execute(&actor, status, limit.unwrap_or(50)).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/api/admin/approvals/{id}", tag = "Approvals",
    params(("id" = Uuid, Path, description = "Change ID")),
    responses(
        (status = 200, body = ChangeDetailResponse),
        (status = 401, description = "Admin only"),
        (status = 404, description = "Change not found")
    ))]
pub async fn get_change(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ChangeDetailResponse>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let changes = ctx.change_repo();
    let lawyers = ctx.lawyer_repo();
    let firms = ctx.firm_repo();
    let uc = GetChange {
        changes: changes.as_ref(),
        lawyers: lawyers.as_ref(),
        firms: firms.as_ref(),
    };
    let detail = uc.execute(&actor, id).await?;
    let (current_lawyer, current_firm) = match detail.current {
        Some(LiveProfileDto::Lawyer(l)) => (Some(l.into()), None),
        Some(LiveProfileDto::Firm(f)) => (None, Some(f.into())),
        None => (None, None),
    };
    Ok(Json(ChangeDetailResponse {
        change: detail.change.into(),
        current_lawyer,
        current_firm,
    }))
}

#[utoipa::path(post, path = "/api/admin/approvals", tag = "Approvals", request_body = ProcessChangeRequest,
    responses(
        (status = 200, body = ChangeDecisionResponse),
        (status = 400, description = "Unknown action or change already processed"),
        (status = 401, description = "Admin only"),
        (status = 404, description = "Change not found")
    ))]
pub async fn process_change(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    ApiJson(req): ApiJson<ProcessChangeRequest>,
) -> ApiResult<Json<ChangeDecisionResponse>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let change_id = parse_uuid("changeId", &req.change_id)?;
    let changes = ctx.change_repo();
    let audit = ctx.audit_repo();
    let notifications = ctx.notification_repo();
    let decision = match req.action.trim().to_ascii_lowercase().as_str() {
        "approve" => {
            let lawyers = ctx.lawyer_repo();
            let firms = ctx.firm_repo();
            let uc = ApproveChange {
                changes: changes.as_ref(),
                lawyers: lawyers.as_ref(),
                firms: firms.as_ref(),
                audit: audit.as_ref(),
                notifications: notifications.as_ref(),
            };
            uc.execute(&actor, change_id, req.note).await?
        }
        "reject" => {
            let uc = RejectChange {
                changes: changes.as_ref(),
                audit: audit.as_ref(),
                notifications: notifications.as_ref(),
            };
            uc.execute(&actor, change_id, req.note).await?
        }
        _ => return Err(ApiError::bad_request("Invalid action")),
    };
    Ok(Json(decision.into()))
}

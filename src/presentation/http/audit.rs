use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::audit::list_audit_logs::ListAuditLogs;
use crate::bootstrap::app_context::AppContext;
use crate::domain::audit::audit_log::AuditLog;
use crate::presentation::http::auth::{Bearer, resolve_actor};
use crate::presentation::http::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogView {
    pub id: Uuid,
    pub actor_id: Option<Uuid>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<AuditLog> for AuditLogView {
    fn from(a: AuditLog) -> Self {
        AuditLogView {
            id: a.id,
            actor_id: a.actor_id,
            action: a.action,
            entity_type: a.entity_type,
            entity_id: a.entity_id,
            details: a.details,
            created_at: a.created_at,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/admin/audit-logs", get(list_audit_logs))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/admin/audit-logs", tag = "Audit",
    params(("limit" = Option<i64>, Query, description = "Max rows (default 100)")),
    responses((status = 200, body = [AuditLogView]), (status = 401, description = "Admin only")))]
pub async fn list_audit_logs(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    q: Option<Query<AuditQuery>>,
) -> ApiResult<Json<Vec<AuditLogView>>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let limit = q.and_then(|Query(v)| v.limit).unwrap_or(100);
    let repo = ctx.audit_repo();
    let uc = ListAuditLogs {
        audit: repo.as_ref(),
    };
    let items = uc.execute(&actor, limit).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

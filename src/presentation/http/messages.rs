use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::messages::list_inbox::ListInbox;
use crate::application::use_cases::messages::mark_read::MarkMessageRead;
use crate::application::use_cases::messages::send_message::SendMessage;
use crate::bootstrap::app_context::AppContext;
use crate::domain::messages::contact_message::{ContactMessage, NewContactMessage};
use crate::domain::profiles::entity::{EntityType, ProfileRef};
use crate::presentation::http::auth::{Bearer, resolve_actor};
use crate::presentation::http::error::{ApiError, ApiResult};
use crate::presentation::http::extract::{ApiJson, null_as_default};
use crate::presentation::http::views::parse_uuid;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SendMessageRequest {
    /// LAWYER or FIRM
    pub target_type: String,
    pub target_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sender_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sender_email: String,
    pub sender_phone: Option<String>,
    pub subject: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: Uuid,
    pub target_type: String,
    pub target_id: Uuid,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_phone: Option<String>,
    pub subject: Option<String>,
    pub body: String,
    pub read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ContactMessage> for MessageView {
    fn from(m: ContactMessage) -> Self {
        MessageView {
            id: m.id,
            target_type: m.target.entity_type().as_str().to_string(),
            target_id: m.target.id(),
            sender_name: m.sender_name,
            sender_email: m.sender_email,
            sender_phone: m.sender_phone,
            subject: m.subject,
            body: m.body,
            read: m.read,
            created_at: m.created_at,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/messages", get(list_inbox).post(send_message))
        .route("/messages/:id/read", post(mark_read))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/messages", tag = "Messages", request_body = SendMessageRequest, security(()),
    responses(
        (status = 200, body = MessageView),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Target not found or not published")
    ))]
pub async fn send_message(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    ApiJson(req): ApiJson<SendMessageRequest>,
) -> ApiResult<Json<MessageView>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let kind = EntityType::parse(&req.target_type)
        .ok_or_else(|| ApiError::bad_request("Invalid targetType"))?;
    let target = ProfileRef::new(kind, parse_uuid("targetId", &req.target_id)?);
    let messages = ctx.message_repo();
    let lawyers = ctx.lawyer_repo();
    let firms = ctx.firm_repo();
    let notifications = ctx.notification_repo();
    let uc = SendMessage {
        messages: messages.as_ref(),
        lawyers: lawyers.as_ref(),
        firms: firms.as_ref(),
        notifications: notifications.as_ref(),
    };
    let message = uc
        .execute(
            &actor,
            NewContactMessage {
                target,
                sender_name: req.sender_name,
                sender_email: req.sender_email,
                sender_phone: req.sender_phone,
                subject: req.subject,
                body: req.body,
            },
        )
        .await?;
    Ok(Json(message.into()))
}

#[utoipa::path(get, path = "/api/messages", tag = "Messages",
    responses((status = 200, body = [MessageView]), (status = 401, description = "No session")))]
pub async fn list_inbox(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
) -> ApiResult<Json<Vec<MessageView>>> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let messages = ctx.message_repo();
    let lawyers = ctx.lawyer_repo();
    let firms = ctx.firm_repo();
    let uc = ListInbox {
        messages: messages.as_ref(),
        lawyers: lawyers.as_ref(),
        firms: firms.as_ref(),
    };
    let items = uc.execute(&actor).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/messages/{id}/read", tag = "Messages",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 204),
        (status = 401, description = "No session"),
        (status = 404, description = "Not found among the caller's messages")
    ))]
pub async fn mark_read(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let messages = ctx.message_repo();
    let lawyers = ctx.lawyer_repo();
    let firms = ctx.firm_repo();
    let uc = MarkMessageRead {
        messages: messages.as_ref(),
        lawyers: lawyers.as_ref(),
        firms: firms.as_ref(),
    };
    uc.execute(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::domain::profiles::entity::ProfileStatus;
    use crate::domain::profiles::lawyer::{LawyerCollections, LawyerDetails};
    use crate::domain::users::user::Role;
    use crate::presentation::http::test_support::{TestApp, read_json};
    use axum::http::StatusCode;
    use serde_json::json;
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

    #[tokio::test]
    async fn anonymous_visitors_can_contact_and_owner_reads() {
        let app = TestApp::new();
        let (owner, owner_token) = app.token_for(Role::Lawyer, "Jane");
        let lawyer = published_lawyer(&app, owner);

        let res = app
            .post(
                "/api/messages",
                None,
                json!({
                    "targetType": "LAWYER",
                    "targetId": lawyer,
                    "senderName": "Pat",
                    "senderEmail": "pat@example.com",
                    "body": "Do you take tenancy cases?"
                }),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let id = read_json(res).await["id"].as_str().unwrap().to_string();
        assert_eq!(app.store.notifications_for(owner).len(), 1);

        let inbox = read_json(app.get("/api/messages", Some(&owner_token)).await).await;
        assert_eq!(inbox[0]["read"], json!(false));

        let (_, stranger) = app.token_for(Role::Lawyer, "Other");
        let res = app
            .post(&format!("/api/messages/{id}/read"), Some(&stranger), json!({}))
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = app
            .post(&format!("/api/messages/{id}/read"), Some(&owner_token), json!({}))
            .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let inbox = read_json(app.get("/api/messages", Some(&owner_token)).await).await;
        assert_eq!(inbox[0]["read"], json!(true));
    }

    #[tokio::test]
    async fn messages_need_sender_details() {
        let app = TestApp::new();
        let (owner, _) = app.token_for(Role::Lawyer, "Jane");
        let lawyer = published_lawyer(&app, owner);
        let res = app
            .post(
                "/api/messages",
                None,
                json!({"targetType": "LAWYER", "targetId": lawyer, "body": "Hello"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn inbox_requires_a_session() {
        let app = TestApp::new();
        let res = app.get("/api/messages", None).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

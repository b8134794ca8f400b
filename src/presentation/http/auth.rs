use crate::application::access::Actor;
use crate::application::ports::user_repository::UserRow;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::error::{ApiError, ApiResult};
use crate::presentation::http::extract::ApiJson;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    /// LAWYER, FIRM_OWNER, LAWYER_FIRM_OWNER or CLIENT
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        UserResponse {
            id: row.id,
            email: row.email,
            name: row.name,
            role: row.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 200, body = UserResponse),
    (status = 400, description = "Invalid input or role"),
    (status = 409, description = "Email already registered")
))]
pub async fn register(
    State(ctx): State<AppContext>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<Json<UserResponse>> {
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        email: req.email,
        name: req.name,
        password: req.password,
        role: req.role,
    };
    let user = uc.execute(&dto).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 401, description = "Invalid credentials")
))]
pub async fn login(
    State(ctx): State<AppContext>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<(HeaderMap, Json<LoginResponse>)> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = uc
        .execute(&dto)
        .await?
        .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "Invalid email or password"))?;
    let token = issue_token(&ctx.cfg, user.id)?;

    // Set HttpOnly cookie with the access token
    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie(&token, ctx.cfg.jwt_expires_secs, secure_cookies(&ctx.cfg));
    headers.insert(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_str(&cookie)
            .unwrap_or(axum::http::HeaderValue::from_static("")),
    );
    tracing::info!(user_id = %user.id, "user_logged_in");

    Ok((
        headers,
        Json(LoginResponse {
            access_token: token,
            user: user.into(),
        }),
    ))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "Auth", responses(
    (status = 200, body = UserResponse),
    (status = 401, description = "No valid session")
))]
pub async fn me(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
) -> ApiResult<Json<UserResponse>> {
    let id = bearer
        .and_then(|b| validate_bearer(&ctx.cfg, b).ok())
        .ok_or_else(ApiError::unauthorized)?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let row = uc.execute(id).await?;
    Ok(Json(row.into()))
}

pub(crate) fn issue_token(cfg: &Config, user_id: Uuid) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + (cfg.jwt_expires_secs.max(0) as usize),
    };
    Ok(jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
    )?)
}

// --- Bearer extractor & JWT utils ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 1) Prefer Authorization header if present
        if let Some(t) = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
        {
            return Ok(Bearer(t.trim().to_string()));
        }

        // 2) Fallback to HttpOnly cookie `access_token`
        if let Some(token) = parts
            .headers
            .get(axum::http::header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|cookie_hdr| get_cookie(cookie_hdr, "access_token"))
        {
            return Ok(Bearer(token));
        }

        Err(StatusCode::UNAUTHORIZED)
    }
}

/// Returns the user id carried by a valid, unexpired token.
pub(crate) fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<Uuid, StatusCode> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)?;
    Uuid::parse_str(&data.claims.sub).map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Resolves the caller to a user and role by loading the user row.
/// A missing, invalid or orphaned token resolves to an anonymous visitor.
pub(crate) async fn resolve_actor(ctx: &AppContext, bearer: Option<Bearer>) -> ApiResult<Actor> {
    let Some(user_id) = bearer.and_then(|b| validate_bearer(&ctx.cfg, b).ok()) else {
        return Ok(Actor::Anonymous);
    };
    match ctx.user_repo().find_by_id(user_id).await? {
        Some(row) => Ok(Actor::User {
            id: row.id,
            role: row.role,
        }),
        None => {
            tracing::debug!(user_id = %user_id, "session_user_missing");
            Ok(Actor::Anonymous)
        }
    }
}

// --- Cookie helpers & logout ---

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim().to_string())
}

fn secure_cookies(cfg: &Config) -> bool {
    cfg.frontend_url
        .as_deref()
        .is_some_and(|u| u.starts_with("https://"))
}

fn build_access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "access_token={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "Auth", responses((status = 204)))]
pub async fn logout(State(ctx): State<AppContext>) -> (HeaderMap, StatusCode) {
    // Clear cookie by setting it expired
    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie("", 0, secure_cookies(&ctx.cfg));
    headers.insert(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_str(&cookie)
            .unwrap_or(axum::http::HeaderValue::from_static("")),
    );
    (headers, StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::http::test_support::{TestApp, read_json};
    use axum::http::header;
    use serde_json::json;

    #[test]
    fn cookie_lookup_ignores_other_pairs() {
        assert_eq!(
            get_cookie("theme=dark; access_token=abc.def ; x=1", "access_token").as_deref(),
            Some("abc.def")
        );
        assert_eq!(get_cookie("theme=dark", "access_token"), None);
    }

    #[test]
    fn issued_tokens_validate() {
        let cfg = Config::for_tests();
        let id = Uuid::new_v4();
        let token = issue_token(&cfg, id).unwrap();
        assert_eq!(validate_bearer(&cfg, Bearer(token)), Ok(id));
        assert_eq!(
            validate_bearer(&cfg, Bearer("garbage".into())),
            Err(StatusCode::UNAUTHORIZED)
        );
    }

    #[tokio::test]
    async fn register_login_me_round_trip() {
        let app = TestApp::new();
        let res = app
            .post(
                "/api/auth/register",
                None,
                json!({"email": "Jane@Example.com", "name": "Jane", "password": "correct-horse", "role": "LAWYER"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .post(
                "/api/auth/login",
                None,
                json!({"email": "jane@example.com", "password": "correct-horse"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(cookie.starts_with("access_token=") && cookie.contains("HttpOnly"));
        let body = read_json(res).await;
        let token = body["accessToken"].as_str().unwrap().to_string();

        let res = app.get("/api/auth/me", Some(&token)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let me = read_json(res).await;
        assert_eq!(me["email"], json!("jane@example.com"));
        assert_eq!(me["role"], json!("LAWYER"));
    }

    #[tokio::test]
    async fn admin_role_cannot_self_register() {
        let app = TestApp::new();
        let res = app
            .post(
                "/api/auth/register",
                None,
                json!({"email": "root@example.com", "name": "Root", "password": "correct-horse", "role": "ADMIN"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(res).await["error"], json!("role is not allowed"));
    }

    #[tokio::test]
    async fn me_without_session_is_unauthorized() {
        let app = TestApp::new();
        let res = app.get("/api/auth/me", None).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

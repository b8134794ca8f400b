use std::net::SocketAddr;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use lawdir::application::use_cases::auth::ensure_admin::EnsureAdmin;
use lawdir::bootstrap::app_context::{AppContext, AppServices};
use lawdir::bootstrap::config::Config;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            lawdir::presentation::http::auth::register,
            lawdir::presentation::http::auth::login,
            lawdir::presentation::http::auth::logout,
            lawdir::presentation::http::auth::me,
            lawdir::presentation::http::lawyers::get_own_profile,
            lawdir::presentation::http::lawyers::create_profile,
            lawdir::presentation::http::lawyers::update_profile,
            lawdir::presentation::http::lawyers::get_public_profile,
            lawdir::presentation::http::firms::get_own_profile,
            lawdir::presentation::http::firms::create_profile,
            lawdir::presentation::http::firms::update_profile,
            lawdir::presentation::http::firms::get_public_profile,
            lawdir::presentation::http::approvals::list_changes,
            lawdir::presentation::http::approvals::get_change,
            lawdir::presentation::http::approvals::process_change,
            lawdir::presentation::http::reviews::submit_review,
            lawdir::presentation::http::reviews::list_reviews,
            lawdir::presentation::http::reviews::moderation_queue,
            lawdir::presentation::http::reviews::moderate_review,
            lawdir::presentation::http::reviews::respond_to_review,
            lawdir::presentation::http::search::search,
            lawdir::presentation::http::messages::send_message,
            lawdir::presentation::http::messages::list_inbox,
            lawdir::presentation::http::messages::mark_read,
            lawdir::presentation::http::notifications::list_notifications,
            lawdir::presentation::http::notifications::mark_read,
            lawdir::presentation::http::notifications::mark_all_read,
            lawdir::presentation::http::audit::list_audit_logs,
            lawdir::presentation::http::specialisations::list_specialisations,
            lawdir::presentation::http::health::health,
        ),
        components(schemas(
            lawdir::presentation::http::auth::RegisterRequest,
            lawdir::presentation::http::auth::LoginRequest,
            lawdir::presentation::http::auth::LoginResponse,
            lawdir::presentation::http::auth::UserResponse,
            lawdir::presentation::http::views::CertificationBody,
            lawdir::presentation::http::views::CourtAppearanceBody,
            lawdir::presentation::http::views::LocationBody,
            lawdir::presentation::http::views::LawyerView,
            lawdir::presentation::http::views::FirmView,
            lawdir::presentation::http::views::PendingChangeView,
            lawdir::presentation::http::views::SubmissionResponse,
            lawdir::presentation::http::views::RatingView,
            lawdir::presentation::http::views::ReviewView,
            lawdir::presentation::http::views::ReviewResponseView,
            lawdir::presentation::http::lawyers::LawyerProfileRequest,
            lawdir::presentation::http::lawyers::OwnLawyerProfileResponse,
            lawdir::presentation::http::lawyers::PublicLawyerResponse,
            lawdir::presentation::http::firms::FirmProfileRequest,
            lawdir::presentation::http::firms::OwnFirmProfileResponse,
            lawdir::presentation::http::firms::PublicFirmResponse,
            lawdir::presentation::http::approvals::ChangeDetailResponse,
            lawdir::presentation::http::approvals::ProcessChangeRequest,
            lawdir::presentation::http::approvals::ChangeDecisionResponse,
            lawdir::presentation::http::reviews::SubmitReviewRequest,
            lawdir::presentation::http::reviews::ModerateReviewRequest,
            lawdir::presentation::http::reviews::RespondRequest,
            lawdir::presentation::http::search::SearchHit,
            lawdir::presentation::http::search::SearchResponse,
            lawdir::presentation::http::messages::SendMessageRequest,
            lawdir::presentation::http::messages::MessageView,
            lawdir::presentation::http::notifications::NotificationView,
            lawdir::presentation::http::notifications::MarkAllReadResponse,
            lawdir::presentation::http::audit::AuditLogView,
            lawdir::presentation::http::specialisations::SpecialisationView,
            lawdir::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Authentication"),
            (name = "Lawyers", description = "Lawyer profiles"),
            (name = "Firms", description = "Law firm profiles"),
            (name = "Approvals", description = "Admin review of profile changes"),
            (name = "Reviews", description = "Client reviews and moderation"),
            (name = "Search", description = "Directory search"),
            (name = "Messages", description = "Contact messages"),
            (name = "Notifications", description = "In-app notifications"),
            (name = "Audit", description = "Audit trail"),
            (name = "Specialisations", description = "Practice-area catalog"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "lawdir=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        production = cfg.is_production,
        "Starting legal directory backend"
    );

    // Database
    let pool =
        lawdir::infrastructure::db::connect_pool(&cfg.database_url, cfg.database_max_connections)
            .await?;
    lawdir::infrastructure::db::migrate(&pool).await?;

    let ctx = AppContext::new(cfg.clone(), AppServices::postgres(pool));

    if let (Some(email), Some(password)) = (cfg.admin_email.as_deref(), cfg.admin_password.as_deref())
    {
        let repo = ctx.user_repo();
        let uc = EnsureAdmin {
            repo: repo.as_ref(),
        };
        uc.execute(email, password).await?;
    }

    // Build CORS
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        // Production refuses to start without FRONTEND_URL, so this is development only.
        Some(Err(_)) | None => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
    };

    let app = lawdir::presentation::http::routes(ctx)
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

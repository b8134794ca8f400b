pub mod approvals;
pub mod audit;
pub mod auth;
pub mod error;
pub mod extract;
pub mod firms;
pub mod health;
pub mod lawyers;
pub mod messages;
pub mod notifications;
pub mod reviews;
pub mod search;
pub mod specialisations;
pub mod views;

use axum::Router;

use crate::bootstrap::app_context::AppContext;

/// Every JSON endpoint, mounted under `/api`.
pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api", health::routes(ctx.clone()))
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api", lawyers::routes(ctx.clone()))
        .nest("/api", firms::routes(ctx.clone()))
        .nest("/api", approvals::routes(ctx.clone()))
        .nest("/api", reviews::routes(ctx.clone()))
        .nest("/api", search::routes(ctx.clone()))
        .nest("/api", messages::routes(ctx.clone()))
        .nest("/api", notifications::routes(ctx.clone()))
        .nest("/api", audit::routes(ctx.clone()))
        .nest("/api", specialisations::routes(ctx))
}

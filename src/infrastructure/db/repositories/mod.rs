pub mod audit_log_repository_sqlx;
pub mod firm_repository_sqlx;
pub mod lawyer_repository_sqlx;
pub mod message_repository_sqlx;
pub mod notification_repository_sqlx;
pub mod pending_change_repository_sqlx;
pub mod review_repository_sqlx;
pub mod search_repository_sqlx;
pub mod specialisation_repository_sqlx;
pub mod user_repository_sqlx;

mod rows;

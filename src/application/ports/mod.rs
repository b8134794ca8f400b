pub mod audit_log_repository;
pub mod firm_repository;
pub mod health_check;
pub mod lawyer_repository;
pub mod message_repository;
pub mod notification_repository;
pub mod pending_change_repository;
pub mod review_repository;
pub mod search_repository;
pub mod slug_lookup;
pub mod specialisation_repository;
pub mod user_repository;

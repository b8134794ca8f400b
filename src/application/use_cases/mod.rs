pub mod approvals;
pub mod audit;
pub mod auth;
pub mod firms;
pub mod lawyers;
pub mod messages;
pub mod notifications;
pub mod reviews;
pub mod search;
pub mod specialisations;

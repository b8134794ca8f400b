pub mod audit;
pub mod changes;
pub mod messages;
pub mod notifications;
pub mod profiles;
pub mod reviews;
pub mod search;
pub mod users;
pub mod validation;

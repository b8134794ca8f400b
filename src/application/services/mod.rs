pub mod notify;
pub mod profiles;
pub mod slugs;

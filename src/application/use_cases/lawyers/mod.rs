pub mod get_own_profile;
pub mod get_public_profile;
pub mod submit_profile;

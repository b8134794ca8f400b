pub mod list_moderation_queue;
pub mod list_reviews;
pub mod moderate_review;
pub mod respond_to_review;
pub mod submit_review;

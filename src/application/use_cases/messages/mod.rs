pub mod list_inbox;
pub mod mark_read;
pub mod send_message;

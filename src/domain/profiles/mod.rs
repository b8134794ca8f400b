pub mod collections;
pub mod entity;
pub mod firm;
pub mod lawyer;
pub mod slug;
pub mod specialisation;

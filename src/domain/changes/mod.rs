pub mod pending_change;

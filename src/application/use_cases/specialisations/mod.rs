pub mod list_specialisations;

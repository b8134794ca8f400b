pub mod search_directory;

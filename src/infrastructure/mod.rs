// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod file_session_store;
pub mod http_repository;

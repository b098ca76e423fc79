// Presentation layer - HTTP surfaces over the application layer
pub mod app_state;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod session_guard;

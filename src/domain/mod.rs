// Domain layer - Data model shared by every surface
pub mod analytics;
pub mod dashboard;
pub mod notification;
pub mod revenue;
pub mod session;
pub mod user;

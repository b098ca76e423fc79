// Application layer - Use cases and the ports they depend on
pub mod credential_verifier;
pub mod dashboard_repository;
pub mod dashboard_service;
pub mod filter_engine;
pub mod notification_store;
pub mod session_gate;
pub mod session_store;

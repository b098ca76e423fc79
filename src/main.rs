// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use crate::application::credential_verifier::StaticCredentialVerifier;
use crate::application::dashboard_service::DashboardService;
use crate::application::session_gate::SessionGate;
use crate::infrastructure::config::{load_dashboard_config, load_roster_config};
use crate::infrastructure::file_session_store::FileSessionStore;
use crate::infrastructure::http_repository::HttpDashboardRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG wins over the default directives
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let roster = load_roster_config()?;

    // Session gate over the on-disk store
    let session_gate = SessionGate::new(
        Arc::new(StaticCredentialVerifier::new(
            config.session.username.clone(),
            config.session.password.clone(),
        )),
        Arc::new(FileSessionStore::new(&config.session.store_path)),
        config.session.login_latency(),
    );

    // Create repository (infrastructure layer) and services (application layer)
    let repository = Arc::new(HttpDashboardRepository::new(config.api.base_url.clone()));
    let dashboard_service = DashboardService::new(repository);

    let state = Arc::new(AppState::new(
        session_gate,
        dashboard_service,
        roster,
        Arc::new(Utc::now),
    ));

    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!(
        api = %config.api.base_url,
        session_store = %config.session.store_path.display(),
        "Starting ops-dashboard on {}",
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

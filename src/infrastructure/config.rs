use crate::domain::revenue::{RevenueLine, RevenueStats};
use crate::domain::user::UserRecord;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub api: ApiSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub store_path: PathBuf,
    pub login_latency_ms: u64,
    pub username: String,
    pub password: String,
}

impl SessionSettings {
    pub fn login_latency(&self) -> Duration {
        Duration::from_millis(self.login_latency_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RosterConfig {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub revenue: RevenueConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RevenueConfig {
    #[serde(default)]
    pub stats: RevenueStats,
    #[serde(default)]
    pub breakdown: Vec<RevenueLine>,
}

fn dashboard_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("api.base_url", "http://localhost:3001")?
        .set_default("session.store_path", "data/session.json")?
        .set_default("session.login_latency_ms", 1000)?
        .set_default("session.username", "admin")?
        .set_default("session.password", "password123")
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = dashboard_builder()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_roster_config() -> anyhow::Result<RosterConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/roster").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

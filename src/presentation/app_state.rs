// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::filter_engine::Clock;
use crate::application::notification_store::NotificationStore;
use crate::application::session_gate::SessionGate;
use crate::infrastructure::config::RosterConfig;
use tokio::sync::RwLock;

pub struct AppState {
    pub session_gate: SessionGate,
    pub dashboard_service: DashboardService,
    /// Read-state of the dashboard surface's notifications. Replaced
    /// wholesale on every dashboard fetch; other surfaces never see it.
    /// Overlapping fetches are last-writer-wins: whichever finishes last
    /// installs its store, even if it started first.
    pub dashboard_notifications: RwLock<NotificationStore>,
    pub roster: RosterConfig,
    pub clock: Clock,
}

impl AppState {
    pub fn new(
        session_gate: SessionGate,
        dashboard_service: DashboardService,
        roster: RosterConfig,
        clock: Clock,
    ) -> Self {
        Self {
            session_gate,
            dashboard_service,
            dashboard_notifications: RwLock::new(NotificationStore::default()),
            roster,
            clock,
        }
    }
}

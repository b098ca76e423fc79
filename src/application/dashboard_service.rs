// Dashboard service - Use case for assembling the dashboard view model
use crate::application::dashboard_repository::{DashboardRepository, FetchError};
use crate::domain::dashboard::DashboardData;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn DashboardRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn DashboardRepository>) -> Self {
        Self { repository }
    }

    /// Fetch both resources concurrently and merge them. The first failure
    /// fails the whole call and drops the other request; there is no
    /// partial result and no retry.
    pub async fn fetch_all(&self) -> Result<DashboardData, FetchError> {
        let (analytics_summary, notifications) = futures::try_join!(
            self.repository.fetch_analytics_summary(),
            self.repository.fetch_notifications()
        )
        .inspect_err(|e| tracing::debug!(resource = %e.resource(), "Dashboard fetch failed: {}", e))?;

        tracing::debug!(
            activities = analytics_summary.recent_activities.len(),
            notifications = notifications.len(),
            "Dashboard data assembled"
        );

        Ok(DashboardData::new(analytics_summary, notifications))
    }
}

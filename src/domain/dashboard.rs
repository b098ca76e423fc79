// Dashboard view model
use super::analytics::AnalyticsSummary;
use super::notification::Notification;
use serde::{Deserialize, Serialize};

/// Merged view of both remote resources. Built wholesale by each fetch and
/// never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub analytics_summary: AnalyticsSummary,
    pub notifications: Vec<Notification>,
}

impl DashboardData {
    pub fn new(analytics_summary: AnalyticsSummary, notifications: Vec<Notification>) -> Self {
        Self {
            analytics_summary,
            notifications,
        }
    }
}

// Repository trait for the two remote dashboard resources
use crate::domain::analytics::AnalyticsSummary;
use crate::domain::notification::Notification;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// The two independently fetched resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    AnalyticsSummary,
    Notifications,
}

impl Resource {
    /// Path segment under the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Resource::AnalyticsSummary => "analyticsSummary",
            Resource::Notifications => "notifications",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::AnalyticsSummary => f.write_str("analytics summary"),
            Resource::Notifications => f.write_str("notifications"),
        }
    }
}

/// Any failure fetching either resource. Payload parse failures land in
/// `Malformed`; there is no separate parse error downstream.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch {resource}: {source}")]
    Network {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch {resource}: server answered {status}")]
    Status { resource: Resource, status: u16 },

    #[error("Failed to parse {resource}: {source}")]
    Malformed {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn resource(&self) -> Resource {
        match self {
            FetchError::Network { resource, .. }
            | FetchError::Status { resource, .. }
            | FetchError::Malformed { resource, .. } => *resource,
        }
    }
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Fetch the analytics summary, including recent activities
    async fn fetch_analytics_summary(&self) -> Result<AnalyticsSummary, FetchError>;

    /// Fetch the ordered notification list
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, FetchError>;
}

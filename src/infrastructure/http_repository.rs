// HTTP repository implementation
use crate::application::dashboard_repository::{DashboardRepository, FetchError, Resource};
use crate::domain::analytics::AnalyticsSummary;
use crate::domain::notification::Notification;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Fetches both dashboard resources with plain GETs. No auth header is
/// attached and no timeout is set here.
#[derive(Debug, Clone)]
pub struct HttpDashboardRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDashboardRepository {
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn resource_url(&self, resource: Resource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: Resource) -> Result<T, FetchError> {
        let url = self.resource_url(resource);
        tracing::debug!("Fetching {} from {}", resource, url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Network { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network { resource, source })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Malformed { resource, source })
    }
}

#[async_trait]
impl DashboardRepository for HttpDashboardRepository {
    async fn fetch_analytics_summary(&self) -> Result<AnalyticsSummary, FetchError> {
        self.get_json(Resource::AnalyticsSummary).await
    }

    async fn fetch_notifications(&self) -> Result<Vec<Notification>, FetchError> {
        self.get_json(Resource::Notifications).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_repository::fakes::{sample_notifications, sample_summary};
    use crate::application::dashboard_service::DashboardService;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    /// Start a stub backend on a random port
    async fn start_stub(router: Router) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (addr, handle)
    }

    fn healthy_routes() -> Router {
        Router::new()
            .route("/analyticsSummary", get(|| async { Json(sample_summary()) }))
            .route("/notifications", get(|| async { Json(sample_notifications()) }))
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let repo = HttpDashboardRepository::new("http://localhost:3001///".to_string());
        assert_eq!(
            repo.resource_url(Resource::Notifications),
            "http://localhost:3001/notifications"
        );
    }

    #[tokio::test]
    async fn test_fetches_both_resources() {
        let (addr, handle) = start_stub(healthy_routes()).await;
        let repo = HttpDashboardRepository::new(format!("http://{}/", addr));

        assert_eq!(repo.fetch_analytics_summary().await.unwrap(), sample_summary());
        assert_eq!(repo.fetch_notifications().await.unwrap(), sample_notifications());
        handle.abort();
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let router = Router::new().route(
            "/notifications",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let (addr, handle) = start_stub(router).await;
        let repo = HttpDashboardRepository::new(format!("http://{}", addr));

        let err = repo.fetch_notifications().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status {
                resource: Resource::Notifications,
                status: 503
            }
        ));
        handle.abort();
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let router = Router::new().route(
            "/analyticsSummary",
            get(|| async { Json(serde_json::json!({ "widgetTitle": 7 })) }),
        );
        let (addr, handle) = start_stub(router).await;
        let repo = HttpDashboardRepository::new(format!("http://{}", addr));

        let err = repo.fetch_analytics_summary().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Malformed {
                resource: Resource::AnalyticsSummary,
                ..
            }
        ));
        handle.abort();
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let repo = HttpDashboardRepository::new(format!("http://{}", addr));
        let err = repo.fetch_notifications().await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
    }

    #[tokio::test]
    async fn test_fetch_all_over_http_fails_when_one_side_fails() {
        let router = Router::new()
            .route("/analyticsSummary", get(|| async { Json(sample_summary()) }))
            .route(
                "/notifications",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
        let (addr, handle) = start_stub(router).await;
        let service = DashboardService::new(Arc::new(HttpDashboardRepository::new(format!(
            "http://{}",
            addr
        ))));

        let err = service.fetch_all().await.unwrap_err();
        assert_eq!(err.resource(), Resource::Notifications);
        handle.abort();
    }

    #[tokio::test]
    async fn test_fetch_all_over_http_merges_payloads() {
        let (addr, handle) = start_stub(healthy_routes()).await;
        let service = DashboardService::new(Arc::new(HttpDashboardRepository::new(format!(
            "http://{}",
            addr
        ))));

        let data = service.fetch_all().await.unwrap();
        assert_eq!(data.analytics_summary, sample_summary());
        assert_eq!(data.notifications, sample_notifications());
        handle.abort();
    }
}

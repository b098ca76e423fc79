// Router assembly
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard, health_check, list_activities, list_notifications, list_users, login,
    mark_all_notifications_read, mark_notification_read, revenue_report, session_status,
};
use crate::presentation::session_guard::require_session;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/notifications", get(list_notifications))
        .route("/api/notifications/read-all", post(mark_all_notifications_read))
        .route("/api/notifications/:id/read", post(mark_notification_read))
        .route("/api/activities", get(list_activities))
        .route("/api/users", get(list_users))
        .route("/api/revenue", get(revenue_report))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/login", post(login))
        .route("/api/session", get(session_status))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::credential_verifier::StaticCredentialVerifier;
    use crate::application::dashboard_repository::fakes::{sample_summary, Canned, FakeRepository};
    use crate::application::dashboard_service::DashboardService;
    use crate::application::filter_engine::Clock;
    use crate::application::session_gate::SessionGate;
    use crate::domain::revenue::{RevenueLine, RevenueStats};
    use crate::domain::user::{Plan, UserRecord, UserStatus};
    use crate::infrastructure::config::{RevenueConfig, RosterConfig};
    use crate::infrastructure::file_session_store::FileSessionStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn user(id: &str, name: &str, status: UserStatus, plan: Plan, joined: NaiveDate) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@email.com", name.to_lowercase().replace(' ', ".")),
            phone: "+1 (555) 123-4567".to_string(),
            location: "Chicago, USA".to_string(),
            join_date: joined,
            status,
            plan,
            last_active: "5 minutes ago".to_string(),
        }
    }

    fn roster() -> RosterConfig {
        let today = NaiveDate::from_ymd_opt(2025, 6, 24).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        RosterConfig {
            users: vec![
                user("1", "John Doe", UserStatus::Active, Plan::Pro, today),
                user("2", "Jane Smith", UserStatus::Active, Plan::Basic, earlier),
                user("3", "Mike Johnson", UserStatus::Inactive, Plan::Pro, earlier),
            ],
            revenue: RevenueConfig {
                stats: RevenueStats {
                    total_revenue: 100.0,
                    ..RevenueStats::default()
                },
                breakdown: vec![
                    RevenueLine {
                        id: "1".to_string(),
                        plan: "Pro Plan".to_string(),
                        revenue: 75.0,
                        users: 3,
                    },
                    RevenueLine {
                        id: "2".to_string(),
                        plan: "Basic Plan".to_string(),
                        revenue: 25.0,
                        users: 5,
                    },
                ],
            },
        }
    }

    struct Harness {
        router: Router,
        state: Arc<AppState>,
        _dir: TempDir,
    }

    fn harness(repo: FakeRepository) -> Harness {
        let dir = TempDir::new().unwrap();
        let gate = SessionGate::new(
            Arc::new(StaticCredentialVerifier::new("admin", "password123")),
            Arc::new(FileSessionStore::new(dir.path().join("session.json"))),
            Duration::ZERO,
        );
        let clock: Clock = Arc::new(|| Utc.with_ymd_and_hms(2025, 6, 24, 12, 0, 0).unwrap());
        let state = Arc::new(AppState::new(
            gate,
            DashboardService::new(Arc::new(repo)),
            roster(),
            clock,
        ));

        Harness {
            router: build_router(state.clone()),
            state,
            _dir: dir,
        }
    }

    async fn signed_in(repo: FakeRepository) -> Harness {
        let harness = harness(repo);
        harness
            .state
            .session_gate
            .attempt_login("admin", "password123")
            .await
            .unwrap();
        harness
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_protected_routes_redirect_without_session() {
        let h = harness(FakeRepository::healthy());

        for uri in ["/api/dashboard", "/api/activities", "/api/users", "/api/revenue", "/api/notifications"] {
            let (status, body) = send(&h.router, "GET", uri, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
            assert_eq!(body["redirect"], "/login");
        }
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let h = harness(FakeRepository::healthy());

        let (status, body) = send(
            &h.router,
            "POST",
            "/api/login",
            Some(json!({ "username": "admin", "password": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid username or password");

        let (_, session) = send(&h.router, "GET", "/api/session", None).await;
        assert_eq!(session["authenticated"], false);
    }

    #[tokio::test]
    async fn test_login_then_dashboard() {
        let h = harness(FakeRepository::healthy());

        let (status, body) = send(
            &h.router,
            "POST",
            "/api/login",
            Some(json!({ "username": "admin", "password": "password123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["redirect"], "/dashboard");
        assert_eq!(body["session"]["username"], "admin");

        let (_, session) = send(&h.router, "GET", "/api/session", None).await;
        assert_eq!(session["authenticated"], true);

        let (status, body) = send(&h.router, "GET", "/api/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["unreadCount"], 2);
        assert_eq!(body["analyticsSummary"]["totalUsers"], 12345);
        assert_eq!(body["notifications"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_notification_read_flow() {
        let h = signed_in(FakeRepository::healthy()).await;
        send(&h.router, "GET", "/api/dashboard", None).await;

        let (_, body) = send(&h.router, "POST", "/api/notifications/n1/read", None).await;
        assert_eq!(body["unreadCount"], 1);

        let (_, body) = send(&h.router, "POST", "/api/notifications/unknown/read", None).await;
        assert_eq!(body["unreadCount"], 1);

        let (_, body) = send(&h.router, "POST", "/api/notifications/read-all", None).await;
        assert_eq!(body["unreadCount"], 0);

        let (_, body) = send(&h.router, "GET", "/api/notifications", None).await;
        assert!(body["notifications"]
            .as_array()
            .unwrap()
            .iter()
            .all(|n| n["read"] == true));

        // A new fetch replaces the store wholesale
        let (_, body) = send(&h.router, "GET", "/api/dashboard", None).await;
        assert_eq!(body["unreadCount"], 2);
    }

    #[tokio::test]
    async fn test_dashboard_failure_is_whole() {
        let h = signed_in(FakeRepository::new(Canned::Ok(sample_summary()), Canned::Status(500))).await;

        let (status, body) = send(&h.router, "GET", "/api/dashboard", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["retry"], "full");
        assert!(body.get("analyticsSummary").is_none());
    }

    #[tokio::test]
    async fn test_activities_filtering() {
        let h = signed_in(FakeRepository::healthy()).await;

        let (status, body) = send(&h.router, "GET", "/api/activities?type=Transaction", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 4);
        assert_eq!(body["shown"], 2);
        assert_eq!(body["items"][0]["id"], "act2");
        assert_eq!(body["items"][1]["id"], "act5");
        assert_eq!(body["categories"][0], "all");

        let (_, body) = send(&h.router, "GET", "/api/activities?type=Transaction&time=today", None).await;
        assert_eq!(body["shown"], 1);

        let (_, body) = send(&h.router, "GET", "/api/activities?search=john", None).await;
        assert_eq!(body["shown"], 1);
        assert_eq!(body["items"][0]["user"], "JohnDoe");
    }

    #[tokio::test]
    async fn test_activities_do_not_touch_dashboard_store() {
        let h = signed_in(FakeRepository::healthy()).await;

        send(&h.router, "GET", "/api/activities", None).await;
        let (_, body) = send(&h.router, "GET", "/api/notifications", None).await;
        assert_eq!(body["unreadCount"], 0);
        assert!(body["notifications"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_time_window_rejected() {
        let h = signed_in(FakeRepository::healthy()).await;

        let (status, _) = send(&h.router, "GET", "/api/activities?time=year", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_users_filtering_and_stats() {
        let h = signed_in(FakeRepository::healthy()).await;

        let (_, body) = send(&h.router, "GET", "/api/users?status=active&plan=Pro", None).await;
        assert_eq!(body["shown"], 1);
        assert_eq!(body["items"][0]["name"], "John Doe");
        assert_eq!(body["stats"]["totalUsers"], 3);
        assert_eq!(body["stats"]["activeUsers"], 2);
        assert_eq!(body["stats"]["joinedToday"], 1);
        assert_eq!(body["statusCategories"], json!(["all", "active", "inactive"]));
        assert_eq!(body["planCategories"], json!(["all", "Pro", "Basic"]));

        let (_, body) = send(&h.router, "GET", "/api/users?search=JOHN", None).await;
        assert_eq!(body["shown"], 2);
    }

    #[tokio::test]
    async fn test_revenue_breakdown() {
        let h = signed_in(FakeRepository::healthy()).await;

        let (_, body) = send(&h.router, "GET", "/api/revenue?plan=Basic%20Plan", None).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["shown"], 1);
        assert_eq!(body["items"][0]["percentage"], 25.0);
        assert_eq!(body["stats"]["totalRevenue"], 100.0);
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let h = harness(FakeRepository::healthy());
        let response = h
            .router
            .clone()
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

// HTTP request handlers
use crate::application::filter_engine::{FilterEngine, FilterState, TimeWindow};
use crate::application::notification_store::NotificationStore;
use crate::application::session_gate::DASHBOARD_ROUTE;
use crate::domain::analytics::Activity;
use crate::domain::dashboard::DashboardData;
use crate::domain::notification::Notification;
use crate::domain::revenue::{revenue_shares, RevenueShare, RevenueStats};
use crate::domain::session::SessionRecord;
use crate::domain::user::{RosterStats, UserRecord};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub redirect: &'static str,
    pub session: SessionRecord,
}

#[derive(Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub data: DashboardData,
    pub unread_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

impl From<&NotificationStore> for NotificationsResponse {
    fn from(store: &NotificationStore) -> Self {
        Self {
            notifications: store.notifications().to_vec(),
            unread_count: store.unread_count(),
        }
    }
}

/// One filtered view: `shown` of `total` records, plus the category choices
#[derive(Serialize)]
pub struct FilteredPage<T: Serialize> {
    pub total: usize,
    pub shown: usize,
    pub items: Vec<T>,
    pub categories: Vec<String>,
}

#[derive(Deserialize, Default)]
pub struct ActivityQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub time: Option<TimeWindow>,
}

#[derive(Deserialize, Default)]
pub struct UserQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub plan: Option<String>,
    pub time: Option<TimeWindow>,
}

#[derive(Deserialize, Default)]
pub struct RevenueQuery {
    pub search: Option<String>,
    pub plan: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub stats: RosterStats,
    pub total: usize,
    pub shown: usize,
    pub items: Vec<UserRecord>,
    pub status_categories: Vec<String>,
    pub plan_categories: Vec<String>,
}

#[derive(Serialize)]
pub struct RevenueResponse {
    pub stats: RevenueStats,
    #[serde(flatten)]
    pub page: FilteredPage<RevenueShare>,
}

fn filter_state(search: Option<String>, category: Option<String>, time: Option<TimeWindow>) -> FilterState {
    let mut state = FilterState::default().with_search(search.unwrap_or_default());
    if let Some(category) = category {
        state = state.with_type(category);
    }
    if let Some(window) = time {
        state = state.with_window(window);
    }
    state
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session = state
        .session_gate
        .attempt_login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        redirect: DASHBOARD_ROUTE,
        session,
    }))
}

pub async fn session_status(State(state): State<Arc<AppState>>) -> Json<SessionStatus> {
    Json(SessionStatus {
        authenticated: state.session_gate.check_session(),
        session: state.session_gate.current_session(),
    })
}

/// Fetch fresh dashboard data and reset the surface's notification store
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Json<DashboardResponse>, ApiError> {
    let data = state.dashboard_service.fetch_all().await?;

    let store = NotificationStore::new(data.notifications.clone());
    let unread_count = store.unread_count();
    *state.dashboard_notifications.write().await = store;

    Ok(Json(DashboardResponse { data, unread_count }))
}

pub async fn list_notifications(State(state): State<Arc<AppState>>) -> Json<NotificationsResponse> {
    let store = state.dashboard_notifications.read().await;
    Json(NotificationsResponse::from(&*store))
}

pub async fn mark_notification_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<NotificationsResponse> {
    let mut store = state.dashboard_notifications.write().await;
    store.mark_read(&id);
    Json(NotificationsResponse::from(&*store))
}

pub async fn mark_all_notifications_read(State(state): State<Arc<AppState>>) -> Json<NotificationsResponse> {
    let mut store = state.dashboard_notifications.write().await;
    store.mark_all_read();
    Json(NotificationsResponse::from(&*store))
}

/// Activity timeline. Runs its own fetch; it shares nothing with the
/// dashboard surface.
pub async fn list_activities(
    Query(query): Query<ActivityQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<FilteredPage<Activity>>, ApiError> {
    let data = state.dashboard_service.fetch_all().await?;
    let activities = data.analytics_summary.recent_activities;

    let engine = FilterEngine::activities().with_clock(state.clock.clone());
    let filter = filter_state(query.search, query.category, query.time);
    let items: Vec<Activity> = engine.filter(&activities, &filter).into_iter().cloned().collect();

    tracing::debug!("Activities: showing {} of {}", items.len(), activities.len());

    Ok(Json(FilteredPage {
        total: activities.len(),
        shown: items.len(),
        categories: engine.categories(&activities),
        items,
    }))
}

pub async fn list_users(
    Query(query): Query<UserQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<UsersResponse> {
    let users = &state.roster.users;
    let status_engine = FilterEngine::users_by_status().with_clock(state.clock.clone());
    let plan_engine = FilterEngine::users_by_plan();

    let by_status = status_engine.filter(users, &filter_state(query.search, query.status, query.time));
    let items: Vec<UserRecord> = plan_engine
        .filter(by_status, &filter_state(None, query.plan, None))
        .into_iter()
        .cloned()
        .collect();

    let today = (state.clock)().date_naive();

    Json(UsersResponse {
        stats: RosterStats::from_roster(users, today),
        total: users.len(),
        shown: items.len(),
        items,
        status_categories: status_engine.categories(users),
        plan_categories: plan_engine.categories(users),
    })
}

pub async fn revenue_report(
    Query(query): Query<RevenueQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<RevenueResponse> {
    let revenue = &state.roster.revenue;
    let engine = FilterEngine::revenue_by_plan();

    let lines = engine.filter(&revenue.breakdown, &filter_state(query.search, query.plan, None));
    let items = revenue_shares(lines, &revenue.breakdown);

    Json(RevenueResponse {
        stats: revenue.stats.clone(),
        page: FilteredPage {
            total: revenue.breakdown.len(),
            shown: items.len(),
            categories: engine.categories(&revenue.breakdown),
            items,
        },
    })
}

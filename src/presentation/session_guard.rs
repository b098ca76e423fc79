// Session check run on entry to every protected route
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.session_gate.check_session() {
        tracing::debug!(path = %request.uri().path(), "No session, sending caller to login");
        return ApiError::Unauthenticated.into_response();
    }

    next.run(request).await
}

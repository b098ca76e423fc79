// API error responses
use crate::application::dashboard_repository::FetchError;
use crate::application::session_gate::{AuthError, LOGIN_ROUTE};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Route the caller should navigate to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    /// Set when the only recovery is re-running the whole operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            redirect: None,
            retry: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Not signed in")]
    Unauthenticated,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Auth(AuthError::Storage(e)) => {
                tracing::error!("Session store write failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Could not sign in, please try again"),
                )
            }
            ApiError::Auth(e) => (StatusCode::UNAUTHORIZED, ErrorResponse::new(e.to_string())),
            ApiError::Fetch(e) => {
                tracing::error!(resource = %e.resource(), "Dashboard fetch failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Failed to load data".to_string(),
                        details: Some(e.to_string()),
                        redirect: None,
                        retry: Some("full".to_string()),
                    },
                )
            }
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    redirect: Some(LOGIN_ROUTE.to_string()),
                    ..ErrorResponse::new(self.to_string())
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

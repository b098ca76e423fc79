// Session gate - Use case for establishing and checking a session
use crate::application::credential_verifier::CredentialVerifier;
use crate::application::session_store::{SessionStore, StoreError, AUTHENTICATED_KEY, USER_KEY};
use crate::domain::session::SessionRecord;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Where the routing collaborator sends the caller after a successful login
pub const DASHBOARD_ROUTE: &str = "/dashboard";
/// Where protected surfaces send a caller without a session
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Could not persist session: {0}")]
    Storage(#[from] StoreError),
}

#[derive(Clone)]
pub struct SessionGate {
    verifier: Arc<dyn CredentialVerifier>,
    store: Arc<dyn SessionStore>,
    latency: Duration,
}

impl SessionGate {
    /// `latency` models the verification round trip; pass `Duration::ZERO`
    /// to skip it.
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        store: Arc<dyn SessionStore>,
        latency: Duration,
    ) -> Self {
        Self {
            verifier,
            store,
            latency,
        }
    }

    pub async fn attempt_login(&self, username: &str, password: &str) -> Result<SessionRecord, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if !self.verifier.verify(username, password) {
            tracing::warn!(username, "Rejected login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let record = SessionRecord::new(username.to_string(), Utc::now());
        let encoded = serde_json::to_string(&record).map_err(StoreError::from)?;

        self.store
            .set_many(&[(USER_KEY, encoded.as_str()), (AUTHENTICATED_KEY, "true")])?;

        tracing::info!(username, "Session established");
        Ok(record)
    }

    /// True iff a session is persisted. Never touches the network.
    pub fn check_session(&self) -> bool {
        match self.store.get(AUTHENTICATED_KEY) {
            Ok(flag) => flag.as_deref() == Some("true"),
            Err(e) => {
                tracing::warn!("Unreadable session store, treating as signed out: {}", e);
                false
            }
        }
    }

    /// The persisted record, if a session exists and its record decodes
    pub fn current_session(&self) -> Option<SessionRecord> {
        if !self.check_session() {
            return None;
        }

        let raw = match self.store.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Unreadable session store: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Stored session record does not decode: {}", e);
                None
            }
        }
    }
}

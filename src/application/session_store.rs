// Keyed persistent storage behind the session gate
use thiserror::Error;

/// Key holding the literal `"true"` while a session exists
pub const AUTHENTICATED_KEY: &str = "isAuthenticated";
/// Key holding the JSON-encoded session record
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session store is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key/value store that survives process restarts
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes every entry in one step: either all of them persist or none do
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError>;
}

// Session domain model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Evidence that a user authenticated. There is no expiry field; a record
/// stays valid until the persisted store is cleared externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub username: String,
    pub login_time: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(username: String, login_time: DateTime<Utc>) -> Self {
        Self {
            username,
            login_time,
        }
    }
}

// Analytics summary domain model
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an activity entry. Unknown categories are carried through
/// as-is so a new backend category never breaks the payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    NewUser,
    Transaction,
    Login,
    Update,
    Other(String),
}

impl ActivityType {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::NewUser => "New User",
            ActivityType::Transaction => "Transaction",
            ActivityType::Login => "Login",
            ActivityType::Update => "Update",
            ActivityType::Other(name) => name,
        }
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "New User" => ActivityType::NewUser,
            "Transaction" => ActivityType::Transaction,
            "Login" => ActivityType::Login,
            "Update" => ActivityType::Update,
            _ => ActivityType::Other(value),
        }
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        match value {
            ActivityType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub description: String,
    /// ISO-8601 string exactly as the backend sent it
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub widget_title: String,
    pub total_users: i64,
    pub new_signups_today: i64,
    pub active_users: i64,
    pub revenue_today: String,
    pub conversion_rate: String,
    #[serde(default)]
    pub recent_activities: Vec<Activity>,
}

// User roster domain model
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plan {
    Basic,
    Pro,
    Enterprise,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "Basic",
            Plan::Pro => "Pro",
            Plan::Enterprise => "Enterprise",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(alias = "join_date")]
    pub join_date: NaiveDate,
    pub status: UserStatus,
    pub plan: Plan,
    #[serde(alias = "last_active")]
    pub last_active: String,
}

/// Headline numbers for the roster screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStats {
    pub total_users: usize,
    pub active_users: usize,
    pub joined_today: usize,
}

impl RosterStats {
    pub fn from_roster(users: &[UserRecord], today: NaiveDate) -> Self {
        Self {
            total_users: users.len(),
            active_users: users
                .iter()
                .filter(|u| u.status == UserStatus::Active)
                .count(),
            joined_today: users.iter().filter(|u| u.join_date == today).count(),
        }
    }
}

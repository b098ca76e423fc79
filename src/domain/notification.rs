// Notification domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Info,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub read: bool,
}

#[cfg(test)]
impl Notification {
    pub fn new(id: impl Into<String>, message: impl Into<String>, severity: Severity, read: bool) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            severity,
            read,
        }
    }
}

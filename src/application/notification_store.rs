// Notification read-state for one surface
use crate::domain::notification::Notification;

/// Ordered notifications plus their read flags. The unread count is always
/// derived from the entries; nothing is ever removed here.
#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
}

impl NotificationStore {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Mark one entry read. Unknown ids are ignored.
    pub fn mark_read(&mut self, id: &str) {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => notification.read = true,
            None => tracing::debug!(id, "mark_read for unknown notification"),
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }
}

//! Point-in-time view of the notification feed.

use serde::{Deserialize, Serialize};

use super::model::Notification;

/// What the presentation layer sees of the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    /// Notifications, most recent first.
    pub notifications: Vec<Notification>,
    /// Number of unread notifications in `notifications`.
    pub unread_count: usize,
    /// Whether a load is in flight.
    pub loading: bool,
}

impl FeedSnapshot {
    /// Whether the feed holds no notifications.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

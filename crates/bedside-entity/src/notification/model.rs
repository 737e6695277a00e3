//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bedside_core::types::id::{NotificationId, PatientId};

use super::kind::NotificationType;

/// A feed entry derived from one care event.
///
/// Only `read` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Derived from the source event id.
    pub id: NotificationId,
    /// Notification category.
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Resolved patient display name, or a fallback.
    pub patient_name: String,
    /// The patient the source event concerns.
    pub patient_id: PatientId,
    /// The source event's creation time.
    pub timestamp: DateTime<Utc>,
    /// Whether the user has read this notification.
    pub read: bool,
}

impl Notification {
    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

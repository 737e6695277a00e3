//! Messages consumed by the feed actor.

use tokio::sync::oneshot;

use bedside_core::result::AppResult;
use bedside_core::types::id::NotificationId;
use bedside_entity::notification::Notification;

/// Everything that can change the feed, in the order it happened.
#[derive(Debug)]
pub enum FeedCommand {
    /// A realtime insert, already mapped and named.
    Pushed(Notification),
    /// A load task finished.
    LoadFinished {
        /// Generation the load was started with.
        generation: u64,
        /// Loaded notifications, newest first.
        result: AppResult<Vec<Notification>>,
    },
    /// Start a new load.
    Refresh,
    /// Mark one notification read; replies whether it was unread.
    MarkAsRead {
        /// Target notification.
        id: NotificationId,
        /// Reply channel.
        reply: oneshot::Sender<bool>,
    },
    /// Mark everything read; replies how many changed.
    MarkAllAsRead {
        /// Reply channel.
        reply: oneshot::Sender<usize>,
    },
}

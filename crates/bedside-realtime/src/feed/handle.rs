//! Cloneable handle the presentation layer uses to read and drive the feed.

use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;

use bedside_core::error::AppError;
use bedside_core::result::AppResult;
use bedside_core::types::id::NotificationId;
use bedside_entity::notification::{FeedSnapshot, Notification};

use super::command::FeedCommand;

/// Handle on a running notification feed.
#[derive(Debug, Clone)]
pub struct FeedHandle {
    commands: mpsc::Sender<FeedCommand>,
    snapshots: watch::Receiver<FeedSnapshot>,
    cancel: CancellationToken,
}

impl FeedHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<FeedCommand>,
        snapshots: watch::Receiver<FeedSnapshot>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            commands,
            snapshots,
            cancel,
        }
    }

    /// The latest published state.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Notifications, most recent first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.snapshots.borrow().notifications.clone()
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.snapshots.borrow().unread_count
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.snapshots.borrow().loading
    }

    /// Receiver notified after every change to the feed.
    pub fn watch(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshots.clone()
    }

    /// Mark one notification read.
    ///
    /// Returns `true` if it was unread. Unknown ids and already-read
    /// notifications are a no-op returning `false`.
    pub async fn mark_as_read(&self, id: &NotificationId) -> AppResult<bool> {
        let (reply, rx) = oneshot::channel();
        self.send(FeedCommand::MarkAsRead {
            id: id.clone(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| stopped())
    }

    /// Mark every notification read. Returns how many changed.
    pub async fn mark_all_as_read(&self) -> AppResult<usize> {
        let (reply, rx) = oneshot::channel();
        self.send(FeedCommand::MarkAllAsRead { reply }).await?;
        rx.await.map_err(|_| stopped())
    }

    /// Start a new load. The result supersedes any load still in flight.
    pub async fn refresh(&self) -> AppResult<()> {
        self.send(FeedCommand::Refresh).await
    }

    /// Stop the feed without waiting for its tasks.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Whether the feed has been shut down.
    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    async fn send(&self, command: FeedCommand) -> AppResult<()> {
        if self.cancel.is_cancelled() {
            return Err(stopped());
        }
        self.commands.send(command).await.map_err(|_| stopped())
    }
}

fn stopped() -> AppError {
    AppError::service_unavailable("Notification feed has shut down")
}

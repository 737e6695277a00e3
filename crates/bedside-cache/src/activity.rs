//! Operator activity log persisted in the key-value store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use bedside_core::result::AppResult;
use bedside_core::traits::alert::{AlertLevel, AlertSink};
use bedside_core::traits::store::KeyValueStore;

use crate::keys;

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Severity.
    pub level: AlertLevel,
    /// What happened.
    pub message: String,
    /// When it was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Capped, newest-first log of operator-visible events.
///
/// The whole log is one JSON array under [`keys::activity_log`]. Writers in
/// this process are serialized; the store itself is not locked.
#[derive(Debug)]
pub struct ActivityLog {
    store: Arc<dyn KeyValueStore>,
    capacity: usize,
    write_lock: Mutex<()>,
}

impl ActivityLog {
    /// Create a log keeping at most `capacity` entries.
    pub fn new(store: Arc<dyn KeyValueStore>, capacity: usize) -> Self {
        Self {
            store,
            capacity: capacity.max(1),
            write_lock: Mutex::new(()),
        }
    }

    /// Append an entry, dropping the oldest ones past capacity.
    pub async fn record(&self, level: AlertLevel, message: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await?;
        entries.insert(
            0,
            ActivityEntry {
                level,
                message: message.to_string(),
                timestamp: Utc::now(),
            },
        );
        entries.truncate(self.capacity);

        let json = serde_json::to_string(&entries)?;
        self.store.set(&keys::activity_log(), &json).await
    }

    /// All entries, newest first.
    pub async fn entries(&self) -> AppResult<Vec<ActivityEntry>> {
        self.load().await
    }

    /// Drop every entry.
    pub async fn clear(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.store.remove(&keys::activity_log()).await?;
        Ok(())
    }

    async fn load(&self) -> AppResult<Vec<ActivityEntry>> {
        match self.store.get(&keys::activity_log()).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl AlertSink for ActivityLog {
    async fn alert(&self, level: AlertLevel, message: &str) {
        if let Err(e) = self.record(level, message).await {
            warn!(error = %e, "Failed to write activity log entry");
        }
    }
}

//! The notification feed manager.
//!
//! One actor task owns the list and the unread counter. Three kinds of
//! input reach it through a single bounded channel, in arrival order:
//! realtime inserts (from the producer task), finished loads (from load
//! tasks), and read-state commands (from [`FeedHandle`]s). Readers get
//! snapshots over a `watch` channel.

pub mod actor;
pub mod command;
pub mod handle;
pub mod loader;
pub mod producer;
pub mod state;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use bedside_core::config::FeedConfig;
use bedside_core::result::AppResult;
use bedside_core::traits::alert::{AlertLevel, AlertSink};
use bedside_entity::source::{EventSource, PatientDirectory};

use self::actor::FeedActor;
use self::handle::FeedHandle;
use self::state::FeedState;

/// A running notification feed.
///
/// Dropping it stops the feed; [`shutdown`](Self::shutdown) also waits for
/// the actor and the producer to finish.
#[derive(Debug)]
pub struct NotificationFeed {
    handle: FeedHandle,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl NotificationFeed {
    /// Subscribe to inserts, start the initial load, and spawn the feed.
    ///
    /// The subscription is opened before the load so no insert falls
    /// between them. If it cannot be opened the feed still runs on loads
    /// alone and the failure is reported to `alerts`.
    pub async fn start(
        config: FeedConfig,
        events: Arc<dyn EventSource>,
        directory: Arc<dyn PatientDirectory>,
        alerts: Arc<dyn AlertSink>,
    ) -> AppResult<Self> {
        config.validate()?;
        let config = Arc::new(config);

        let (tx, rx) = mpsc::channel(config.channel_buffer_size);
        let cancel = CancellationToken::new();
        let mut tasks = Vec::with_capacity(2);

        match events.subscribe_inserts().await {
            Ok(subscription) => {
                tasks.push(tokio::spawn(producer::run_producer(
                    subscription,
                    directory.clone(),
                    config.placeholder_patient_name.clone(),
                    tx.clone(),
                    cancel.clone(),
                )));
            }
            Err(e) => {
                error!(error = %e, "Failed to subscribe to care event inserts");
                alerts
                    .alert(
                        AlertLevel::Error,
                        &format!("Atualizações em tempo real indisponíveis: {e}"),
                    )
                    .await;
            }
        }

        let mut state = FeedState::new(config.max_notifications);
        let initial_load = state.begin_load();
        let (snapshots_tx, snapshots_rx) = watch::channel(state.snapshot());

        let actor = FeedActor {
            state,
            config: config.clone(),
            events,
            directory,
            alerts,
            commands: rx,
            loopback: tx.clone(),
            snapshots: snapshots_tx,
            cancel: cancel.clone(),
        };
        tasks.push(tokio::spawn(actor.run(Some(initial_load))));

        info!(
            max_notifications = config.max_notifications,
            lookback_hours = config.lookback_hours,
            "Notification feed started"
        );

        Ok(Self {
            handle: FeedHandle::new(tx, snapshots_rx, cancel.clone()),
            cancel,
            tasks,
        })
    }

    /// A handle for reading and driving the feed.
    pub fn handle(&self) -> FeedHandle {
        self.handle.clone()
    }

    /// Unsubscribe, stop the actor, and wait for both tasks.
    ///
    /// Loads still in flight are abandoned and their results discarded.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                error!(error = %e, "Feed task ended abnormally");
            }
        }
        info!("Notification feed shut down");
    }
}

impl Drop for NotificationFeed {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
